//! Property visitors - how classified properties surface downstream.
//!
//! Up-to-date checking and fingerprinting walk a type's classified properties
//! through a [`PropertyVisitor`]. Each capability handler decides which visit
//! event its role produces.

use serde::Serialize;

use crate::core::normalization::{
    DirectorySensitivity, LineEndingSensitivity, NormalizationSpec, Normalizer,
};

/// What kind of file input a property declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFileKind {
    File,
    Files,
    Directory,
    /// The primary artifact of a transform
    Artifact,
    /// Dependencies of a transform's primary artifact
    ArtifactDependencies,
}

/// What kind of output a property declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputKind {
    File,
    Files,
    Directory,
    Directories,
}

/// A file input as seen by fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFileProperty {
    pub name: String,
    pub kind: InputFileKind,
    pub optional: bool,
    pub skip_when_empty: bool,
    pub incremental: bool,
    /// Explicitly selected normalizer; `None` means the default applies
    pub normalizer: Option<Normalizer>,
    pub directory_sensitivity: DirectorySensitivity,
    pub line_ending_sensitivity: LineEndingSensitivity,
}

impl InputFileProperty {
    /// Normalization settings with the default normalizer applied.
    pub fn normalization(&self) -> NormalizationSpec {
        NormalizationSpec {
            normalizer: self.normalizer.unwrap_or_default(),
            directory_sensitivity: self.directory_sensitivity,
            line_ending_sensitivity: self.line_ending_sensitivity,
        }
    }
}

/// Receives classified properties. Every event defaults to a no-op.
pub trait PropertyVisitor {
    /// Visitors that only care about outputs are skipped by input handlers.
    fn outputs_only(&self) -> bool {
        false
    }

    fn visit_input_property(&mut self, _name: &str, _optional: bool) {}

    fn visit_input_file_property(&mut self, _property: InputFileProperty) {}

    fn visit_output_file_property(&mut self, _name: &str, _kind: OutputKind) {}

    fn visit_nested(&mut self, _name: &str, _optional: bool) {}

    fn visit_destroyable(&mut self, _name: &str) {}

    fn visit_local_state(&mut self, _name: &str) {}
}

/// One visit event recorded by [`PropertyPlan`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum PlannedProperty {
    Input { name: String, optional: bool },
    InputFiles(InputFileProperty),
    Output { name: String, kind: OutputKind },
    Nested { name: String, optional: bool },
    Destroys { name: String },
    LocalState { name: String },
}

impl PlannedProperty {
    pub fn name(&self) -> &str {
        match self {
            PlannedProperty::Input { name, .. }
            | PlannedProperty::Output { name, .. }
            | PlannedProperty::Nested { name, .. }
            | PlannedProperty::Destroys { name }
            | PlannedProperty::LocalState { name } => name,
            PlannedProperty::InputFiles(property) => &property.name,
        }
    }
}

/// Visitor that records every event, in visit order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyPlan {
    #[serde(skip)]
    outputs_only: bool,
    pub properties: Vec<PlannedProperty>,
}

impl PropertyPlan {
    pub fn new() -> Self {
        PropertyPlan::default()
    }

    /// A plan that only records outputs.
    pub fn outputs_only() -> Self {
        PropertyPlan {
            outputs_only: true,
            properties: Vec::new(),
        }
    }

    pub fn input_files(&self) -> impl Iterator<Item = &InputFileProperty> {
        self.properties.iter().filter_map(|p| match p {
            PlannedProperty::InputFiles(property) => Some(property),
            _ => None,
        })
    }

    pub fn names(&self) -> Vec<&str> {
        self.properties.iter().map(PlannedProperty::name).collect()
    }
}

impl PropertyVisitor for PropertyPlan {
    fn outputs_only(&self) -> bool {
        self.outputs_only
    }

    fn visit_input_property(&mut self, name: &str, optional: bool) {
        self.properties.push(PlannedProperty::Input {
            name: name.to_string(),
            optional,
        });
    }

    fn visit_input_file_property(&mut self, property: InputFileProperty) {
        self.properties.push(PlannedProperty::InputFiles(property));
    }

    fn visit_output_file_property(&mut self, name: &str, kind: OutputKind) {
        self.properties.push(PlannedProperty::Output {
            name: name.to_string(),
            kind,
        });
    }

    fn visit_nested(&mut self, name: &str, optional: bool) {
        self.properties.push(PlannedProperty::Nested {
            name: name.to_string(),
            optional,
        });
    }

    fn visit_destroyable(&mut self, name: &str) {
        self.properties.push(PlannedProperty::Destroys {
            name: name.to_string(),
        });
    }

    fn visit_local_state(&mut self, name: &str) {
        self.properties.push(PlannedProperty::LocalState {
            name: name.to_string(),
        });
    }
}
