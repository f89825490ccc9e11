//! Handlers for file inputs: `InputFile`, `InputFiles` and `InputDirectory`.

use crate::capability::handler::CapabilityHandler;
use crate::capability::rules::validate_unsupported_value_types;
use crate::capability::visitor::{InputFileKind, InputFileProperty, PropertyVisitor};
use crate::core::marker::{MarkerCategory, MarkerKind};
use crate::core::normalization::{DirectorySensitivity, LineEndingSensitivity, Normalizer};
use crate::core::property::PropertyDescriptor;
use crate::validation::log::ValidationLog;

const SINGLE_FILE_MODIFIERS: &[MarkerCategory] = &[
    MarkerCategory::Optional,
    MarkerCategory::Incremental,
    MarkerCategory::Normalization,
    MarkerCategory::LineEndingSensitivity,
];

const FILE_TREE_MODIFIERS: &[MarkerCategory] = &[
    MarkerCategory::Optional,
    MarkerCategory::Incremental,
    MarkerCategory::Normalization,
    MarkerCategory::DirectorySensitivity,
    MarkerCategory::LineEndingSensitivity,
];

/// Build the fingerprinting view of a file input property.
pub(crate) fn input_file_property(
    property: &PropertyDescriptor,
    kind: InputFileKind,
) -> InputFileProperty {
    InputFileProperty {
        name: property.name().to_string(),
        kind,
        optional: property.is_optional(),
        skip_when_empty: property.has_marker(MarkerKind::SkipWhenEmpty),
        incremental: property.has_marker(MarkerKind::Incremental),
        normalizer: Normalizer::for_property(property),
        directory_sensitivity: DirectorySensitivity::for_property(property),
        line_ending_sensitivity: LineEndingSensitivity::for_property(property),
    }
}

/// File inputs fingerprinted according to their normalization markers.
#[derive(Debug)]
pub struct InputFilesHandler {
    role: MarkerKind,
    kind: InputFileKind,
}

impl InputFilesHandler {
    pub fn input_file() -> Self {
        InputFilesHandler {
            role: MarkerKind::InputFile,
            kind: InputFileKind::File,
        }
    }

    pub fn input_files() -> Self {
        InputFilesHandler {
            role: MarkerKind::InputFiles,
            kind: InputFileKind::Files,
        }
    }

    pub fn input_directory() -> Self {
        InputFilesHandler {
            role: MarkerKind::InputDirectory,
            kind: InputFileKind::Directory,
        }
    }
}

impl CapabilityHandler for InputFilesHandler {
    fn role(&self) -> MarkerKind {
        self.role
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        match self.kind {
            InputFileKind::File => SINGLE_FILE_MODIFIERS,
            _ => FILE_TREE_MODIFIERS,
        }
    }

    fn validate(&self, property: &PropertyDescriptor, log: &mut ValidationLog) {
        validate_unsupported_value_types(self.role, property, log);
    }

    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor) {
        visitor.visit_input_file_property(input_file_property(property, self.kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::visitor::PropertyPlan;
    use crate::core::marker::{Marker, PathSensitivity};
    use crate::core::value_type::ValueType;

    #[test]
    fn test_visit_resolves_normalization() {
        let property = PropertyDescriptor::new("sources", ValueType::FileCollection)
            .with_marker(MarkerKind::InputFiles)
            .with_marker(MarkerKind::SkipWhenEmpty)
            .with_marker(Marker::path_sensitive(PathSensitivity::Relative))
            .with_marker(MarkerKind::IgnoreEmptyDirectories);

        let mut plan = PropertyPlan::new();
        InputFilesHandler::input_files().visit(&property, &mut plan);

        let visited: Vec<_> = plan.input_files().collect();
        assert_eq!(visited.len(), 1);
        assert_eq!(visited[0].kind, InputFileKind::Files);
        assert!(visited[0].skip_when_empty);
        assert!(!visited[0].incremental);
        assert_eq!(visited[0].normalizer, Some(Normalizer::RelativePath));
        assert_eq!(
            visited[0].directory_sensitivity,
            DirectorySensitivity::IgnoreDirectories
        );
    }

    #[test]
    fn test_single_file_rejects_directory_sensitivity() {
        let handler = InputFilesHandler::input_file();
        assert!(!handler
            .allowed_modifiers()
            .contains(&MarkerCategory::DirectorySensitivity));
        assert!(InputFilesHandler::input_directory()
            .allowed_modifiers()
            .contains(&MarkerCategory::DirectorySensitivity));
    }

    #[test]
    fn test_input_directory_on_regular_file() {
        let property = PropertyDescriptor::new("dir", ValueType::RegularFile)
            .with_marker(MarkerKind::InputDirectory);
        let mut log = ValidationLog::new();
        InputFilesHandler::input_directory().validate(&property, &mut log);
        assert_eq!(log.len(), 1);
        assert_eq!(log.problems()[0].solutions(), &["Mark it as InputFile".to_string()]);
    }

    #[test]
    fn test_outputs_only_visitor_skips_inputs() {
        let handler = InputFilesHandler::input_files();
        assert!(!handler.should_visit(&PropertyPlan::outputs_only()));
        assert!(handler.should_visit(&PropertyPlan::new()));
    }
}
