//! Handlers for the transform roles `InputArtifact` and `InputArtifactDependencies`.
//!
//! These roles only exist on transform actions. Registration visits them to
//! recover the normalization the action selected for its primary artifact and
//! for that artifact's dependencies.

use crate::capability::files::input_file_property;
use crate::capability::handler::CapabilityHandler;
use crate::capability::rules::validate_unsupported_value_types;
use crate::capability::visitor::{InputFileKind, PropertyVisitor};
use crate::core::marker::{MarkerCategory, MarkerKind};
use crate::core::property::PropertyDescriptor;
use crate::validation::log::ValidationLog;

#[derive(Debug)]
pub struct InputArtifactHandler {
    role: MarkerKind,
    kind: InputFileKind,
}

impl InputArtifactHandler {
    pub fn input_artifact() -> Self {
        InputArtifactHandler {
            role: MarkerKind::InputArtifact,
            kind: InputFileKind::Artifact,
        }
    }

    pub fn input_artifact_dependencies() -> Self {
        InputArtifactHandler {
            role: MarkerKind::InputArtifactDependencies,
            kind: InputFileKind::ArtifactDependencies,
        }
    }
}

impl CapabilityHandler for InputArtifactHandler {
    fn role(&self) -> MarkerKind {
        self.role
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        match self.kind {
            InputFileKind::Artifact => &[
                MarkerCategory::Incremental,
                MarkerCategory::Normalization,
                MarkerCategory::DirectorySensitivity,
                MarkerCategory::LineEndingSensitivity,
            ],
            _ => &[
                MarkerCategory::Normalization,
                MarkerCategory::DirectorySensitivity,
                MarkerCategory::LineEndingSensitivity,
            ],
        }
    }

    fn validate(&self, property: &PropertyDescriptor, log: &mut ValidationLog) {
        validate_unsupported_value_types(self.role, property, log);
    }

    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor) {
        visitor.visit_input_file_property(input_file_property(property, self.kind));
    }
}
