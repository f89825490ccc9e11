//! Classification of a single type against an inspection scheme.

use crate::capability::handler::CapabilityHandler;
use crate::capability::scheme::InspectionScheme;
use crate::core::marker::{Marker, MarkerCategory, MarkerKind};
use crate::core::property::{PropertyDescriptor, TypeName};
use crate::introspect::TypeIntrospector;
use crate::store::metadata::{ClassifiedProperty, TypeMetadata};
use crate::validation::log::ValidationLog;
use crate::validation::problem::{join_for_display, ProblemKind, Severity};

/// The role a property plays: its `Type` marker, or `InputFiles` implied by a
/// `Classpath` or `CompileClasspath` normalization marker.
pub fn effective_role(property: &PropertyDescriptor) -> Option<MarkerKind> {
    if let Some(marker) = property.marker(MarkerCategory::Type) {
        return Some(marker.kind());
    }
    match property.marker(MarkerCategory::Normalization).map(Marker::kind) {
        Some(MarkerKind::Classpath | MarkerKind::CompileClasspath) => Some(MarkerKind::InputFiles),
        _ => None,
    }
}

pub(crate) fn classify(
    introspector: &dyn TypeIntrospector,
    scheme: &InspectionScheme,
    expected_marker: &str,
    ty: &TypeName,
) -> TypeMetadata {
    let mut log = ValidationLog::new();
    let descriptors = introspector.properties(ty);
    introspector.validate_type(ty, &mut log);

    tracing::debug!(
        type_name = %ty,
        scheme = %scheme.kind(),
        properties = descriptors.len(),
        "classifying type"
    );

    let mut properties = Vec::new();
    for descriptor in descriptors {
        let Some(role) = effective_role(&descriptor) else {
            report_missing_role(&descriptor, expected_marker, &mut log);
            continue;
        };

        let Some(handler) = scheme.handlers().get(role) else {
            report_unrecognized_role(&descriptor, role, scheme, &mut log);
            continue;
        };

        validate_modifiers(&descriptor, role, handler.as_ref(), scheme, &mut log);
        handler.validate(&descriptor, &mut log);

        if handler.is_relevant() {
            properties.push(ClassifiedProperty::new(descriptor, role, handler.clone()));
        }
    }

    tracing::debug!(
        type_name = %ty,
        classified = properties.len(),
        problems = log.len(),
        "classified type"
    );

    TypeMetadata::new(ty.clone(), properties, log)
}

fn report_missing_role(property: &PropertyDescriptor, expected_marker: &str, log: &mut ValidationLog) {
    log.report(ProblemKind::MissingCapability, |p| {
        p.property(property.name())
            .description(format!("is missing {}", expected_marker))
            .reason("A property without a marker isn't considered during up-to-date checking")
            .solution(format!("Add {}", expected_marker))
            .solution("Mark it as Internal")
    });
}

fn report_unrecognized_role(
    property: &PropertyDescriptor,
    role: MarkerKind,
    scheme: &InspectionScheme,
    log: &mut ValidationLog,
) {
    let roles = scheme.handlers().roles();
    log.report(ProblemKind::UnrecognizedCapabilityInContext, |p| {
        p.property(property.name())
            .description(format!("is marked with invalid role {}", role))
            .reason(format!("The '{}' marker cannot be used in this context", role))
            .solution("Remove the property")
            .solution(format!(
                "Use a different marker, e.g. one of {}",
                join_for_display(roles.iter().map(MarkerKind::as_str))
            ))
    });
}

fn validate_modifiers(
    property: &PropertyDescriptor,
    role: MarkerKind,
    handler: &dyn CapabilityHandler,
    scheme: &InspectionScheme,
    log: &mut ValidationLog,
) {
    let allowed = handler.allowed_modifiers();
    for marker in property.markers() {
        let category = marker.category();
        if category == MarkerCategory::Type {
            continue;
        }
        let modifier = marker.kind();

        if !allowed.contains(&category) {
            let allowed_kinds = scheme.recognized_in(allowed);
            let allowed_list = if allowed_kinds.is_empty() {
                "none".to_string()
            } else {
                join_for_display(allowed_kinds.iter().map(MarkerKind::as_str))
            };
            // Modifiers on ignored properties have no effect at all
            let severity = if handler.is_relevant() {
                Severity::Error
            } else {
                Severity::Warning
            };
            log.report(ProblemKind::IncompatibleModifier, |p| {
                p.property(property.name())
                    .severity(severity)
                    .description(format!(
                        "is marked with {} but that is not allowed for '{}' properties",
                        modifier, role
                    ))
                    .long_description(format!(
                        "The list of allowed modifiers for '{}' is {}",
                        role, allowed_list
                    ))
                    .reason(format!(
                        "The '{}' marker has no meaning on properties marked with '{}'",
                        modifier, role
                    ))
                    .solution(format!("Remove the '{}' marker", modifier))
            });
        } else if !scheme.is_recognized(modifier) {
            let recognized = join_for_display(
                scheme
                    .recognized_modifiers()
                    .iter()
                    .map(MarkerKind::as_str),
            );
            log.report(ProblemKind::UnrecognizedCapabilityInContext, |p| {
                p.property(property.name())
                    .description(format!("is marked with invalid modifier {}", modifier))
                    .reason(format!("The '{}' marker cannot be used in this context", modifier))
                    .solution(format!("Remove the '{}' marker", modifier))
                    .solution(format!("Use a different marker, e.g. one of {}", recognized))
            });
        }
    }
}
