//! Validation rules shared between capability handlers.

use crate::core::marker::MarkerKind;
use crate::core::property::PropertyDescriptor;
use crate::core::value_type::ValueType;
use crate::validation::log::ValidationLog;
use crate::validation::problem::ProblemKind;

#[derive(Debug, Clone, Copy)]
enum TypeMatch {
    Named(&'static str),
    RegularFile,
    Directory,
    FileCollection,
}

impl TypeMatch {
    fn matches(&self, ty: &ValueType) -> bool {
        match (self, ty) {
            (TypeMatch::Named(expected), ValueType::Named(name)) => name == expected,
            (TypeMatch::RegularFile, ValueType::RegularFile) => true,
            (TypeMatch::Directory, ValueType::Directory) => true,
            (TypeMatch::FileCollection, ValueType::FileCollection | ValueType::FileTree) => true,
            _ => false,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            TypeMatch::Named(name) => name,
            TypeMatch::RegularFile => "RegularFile",
            TypeMatch::Directory => "Directory",
            TypeMatch::FileCollection => "FileCollection",
        }
    }
}

#[derive(Debug)]
struct UnsupportedValueType {
    matcher: TypeMatch,
    solutions: &'static [&'static str],
}

const RESOLVED_ARTIFACT_RESULT: UnsupportedValueType = UnsupportedValueType {
    matcher: TypeMatch::Named("ResolvedArtifactResult"),
    solutions: &[
        "Extract artifact metadata and mark it as Input",
        "Extract artifact files and mark them as InputFiles",
    ],
};

/// Value types that are not supported for a role.
fn unsupported_value_types(role: MarkerKind) -> &'static [UnsupportedValueType] {
    match role {
        MarkerKind::Input | MarkerKind::InputFiles | MarkerKind::Nested => {
            &[RESOLVED_ARTIFACT_RESULT]
        }
        MarkerKind::InputFile => &[
            RESOLVED_ARTIFACT_RESULT,
            UnsupportedValueType {
                matcher: TypeMatch::Directory,
                solutions: &["Mark it as InputDirectory"],
            },
        ],
        MarkerKind::InputDirectory => &[
            RESOLVED_ARTIFACT_RESULT,
            UnsupportedValueType {
                matcher: TypeMatch::RegularFile,
                solutions: &["Mark it as InputFile"],
            },
        ],
        MarkerKind::OutputFile => &[UnsupportedValueType {
            matcher: TypeMatch::Directory,
            solutions: &["Mark it as OutputDirectory"],
        }],
        MarkerKind::OutputDirectory => &[UnsupportedValueType {
            matcher: TypeMatch::RegularFile,
            solutions: &["Mark it as OutputFile"],
        }],
        MarkerKind::InputArtifact => &[UnsupportedValueType {
            matcher: TypeMatch::FileCollection,
            solutions: &[
                "Declare the property as Provider<FileSystemLocation>",
                "Mark it as InputArtifactDependencies to receive the artifact's dependencies",
            ],
        }],
        MarkerKind::InputArtifactDependencies => &[
            UnsupportedValueType {
                matcher: TypeMatch::RegularFile,
                solutions: &[
                    "Declare the property as FileCollection",
                    "Mark it as InputArtifact to receive the primary artifact",
                ],
            },
            UnsupportedValueType {
                matcher: TypeMatch::Directory,
                solutions: &[
                    "Declare the property as FileCollection",
                    "Mark it as InputArtifact to receive the primary artifact",
                ],
            },
        ],
        _ => &[],
    }
}

/// Report value types that `role` does not support.
///
/// A deferred `Provider<T>` is unwrapped once and `T` is checked instead.
pub fn validate_unsupported_value_types(
    role: MarkerKind,
    property: &PropertyDescriptor,
    log: &mut ValidationLog,
) {
    let declared = property.value_type();
    let value_type = declared.unpack_provider();
    for rule in unsupported_value_types(role) {
        if !rule.matcher.matches(value_type) {
            continue;
        }
        log.report(ProblemKind::UnsupportedValueType, |p| {
            let p = p
                .property(property.name())
                .description(format!(
                    "has {} marker used on property of type '{}'",
                    role, declared
                ))
                .reason(format!(
                    "{} is not supported on properties marked with {}",
                    rule.matcher.label(),
                    role
                ));
            rule.solutions.iter().fold(p, |p, solution| p.solution(*solution))
        });
    }
}
