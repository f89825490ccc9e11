//! Handlers for outputs, destroyables and local state.

use crate::capability::handler::CapabilityHandler;
use crate::capability::rules::validate_unsupported_value_types;
use crate::capability::visitor::{OutputKind, PropertyVisitor};
use crate::core::marker::{MarkerCategory, MarkerKind};
use crate::core::property::PropertyDescriptor;
use crate::validation::log::ValidationLog;

/// Output files and directories produced by the component.
#[derive(Debug)]
pub struct OutputHandler {
    role: MarkerKind,
    kind: OutputKind,
}

impl OutputHandler {
    pub fn output_file() -> Self {
        OutputHandler {
            role: MarkerKind::OutputFile,
            kind: OutputKind::File,
        }
    }

    pub fn output_files() -> Self {
        OutputHandler {
            role: MarkerKind::OutputFiles,
            kind: OutputKind::Files,
        }
    }

    pub fn output_directory() -> Self {
        OutputHandler {
            role: MarkerKind::OutputDirectory,
            kind: OutputKind::Directory,
        }
    }

    pub fn output_directories() -> Self {
        OutputHandler {
            role: MarkerKind::OutputDirectories,
            kind: OutputKind::Directories,
        }
    }
}

impl CapabilityHandler for OutputHandler {
    fn role(&self) -> MarkerKind {
        self.role
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        &[]
    }

    fn is_output(&self) -> bool {
        true
    }

    fn validate(&self, property: &PropertyDescriptor, log: &mut ValidationLog) {
        validate_unsupported_value_types(self.role, property, log);
    }

    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor) {
        visitor.visit_output_file_property(property.name(), self.kind);
    }
}

/// Files the component deletes.
#[derive(Debug, Default)]
pub struct DestroysHandler;

impl CapabilityHandler for DestroysHandler {
    fn role(&self) -> MarkerKind {
        MarkerKind::Destroys
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        &[]
    }

    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor) {
        visitor.visit_destroyable(property.name());
    }
}

/// Scratch files owned by the component but never cached.
#[derive(Debug, Default)]
pub struct LocalStateHandler;

impl CapabilityHandler for LocalStateHandler {
    fn role(&self) -> MarkerKind {
        MarkerKind::LocalState
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        &[]
    }

    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor) {
        visitor.visit_local_state(property.name());
    }
}
