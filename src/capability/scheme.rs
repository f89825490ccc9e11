//! Inspection schemes - which roles and modifiers a context understands.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capability::registry::HandlerRegistry;
use crate::core::marker::{MarkerCategory, MarkerKind};

/// The contexts a type can be inspected in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemeKind {
    Tasks,
    TransformActions,
    TransformParameters,
}

impl SchemeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemeKind::Tasks => "tasks",
            SchemeKind::TransformActions => "transform-actions",
            SchemeKind::TransformParameters => "transform-parameters",
        }
    }

    pub fn scheme(&self) -> InspectionScheme {
        match self {
            SchemeKind::Tasks => InspectionScheme::tasks(),
            SchemeKind::TransformActions => InspectionScheme::transform_actions(),
            SchemeKind::TransformParameters => InspectionScheme::transform_parameters(),
        }
    }
}

impl fmt::Display for SchemeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemeKind {
    type Err = SchemeKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tasks" => Ok(SchemeKind::Tasks),
            "transform-actions" => Ok(SchemeKind::TransformActions),
            "transform-parameters" => Ok(SchemeKind::TransformParameters),
            other => Err(SchemeKindParseError(other.to_string())),
        }
    }
}

/// Error returned when parsing an unknown inspection scheme.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown inspection scheme `{0}` (expected tasks, transform-actions or transform-parameters)")]
pub struct SchemeKindParseError(pub String);

/// A handler registry paired with the modifier kinds recognized in its context.
#[derive(Debug, Clone)]
pub struct InspectionScheme {
    kind: SchemeKind,
    handlers: HandlerRegistry,
    recognized_modifiers: BTreeSet<MarkerKind>,
}

impl InspectionScheme {
    pub fn new(
        kind: SchemeKind,
        handlers: HandlerRegistry,
        recognized_modifiers: impl IntoIterator<Item = MarkerKind>,
    ) -> Self {
        InspectionScheme {
            kind,
            handlers,
            recognized_modifiers: recognized_modifiers.into_iter().collect(),
        }
    }

    /// Every task role, every modifier.
    pub fn tasks() -> Self {
        InspectionScheme::new(
            SchemeKind::Tasks,
            HandlerRegistry::for_tasks(),
            MarkerKind::ALL.iter().copied().filter(|kind| !kind.is_role()),
        )
    }

    /// Artifact roles only. Transform actions cannot skip on empty inputs.
    pub fn transform_actions() -> Self {
        InspectionScheme::new(
            SchemeKind::TransformActions,
            HandlerRegistry::for_transform_actions(),
            [
                MarkerKind::Incremental,
                MarkerKind::PathSensitive,
                MarkerKind::Classpath,
                MarkerKind::CompileClasspath,
                MarkerKind::IgnoreEmptyDirectories,
                MarkerKind::NormalizeLineEndings,
            ],
        )
    }

    pub fn transform_parameters() -> Self {
        InspectionScheme::new(
            SchemeKind::TransformParameters,
            HandlerRegistry::for_transform_parameters(),
            MarkerKind::in_category(MarkerCategory::Optional)
                .chain(MarkerKind::in_category(MarkerCategory::Normalization))
                .chain(MarkerKind::in_category(MarkerCategory::DirectorySensitivity))
                .chain(MarkerKind::in_category(MarkerCategory::LineEndingSensitivity)),
        )
    }

    pub fn kind(&self) -> SchemeKind {
        self.kind
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    pub fn is_recognized(&self, modifier: MarkerKind) -> bool {
        self.recognized_modifiers.contains(&modifier)
    }

    /// Every recognized modifier kind, sorted by name.
    pub fn recognized_modifiers(&self) -> Vec<MarkerKind> {
        let mut kinds: Vec<_> = self.recognized_modifiers.iter().copied().collect();
        kinds.sort_by_key(|kind| kind.as_str());
        kinds
    }

    /// Recognized modifier kinds in one of `categories`, sorted by name.
    pub fn recognized_in(&self, categories: &[MarkerCategory]) -> Vec<MarkerKind> {
        self.recognized_modifiers()
            .into_iter()
            .filter(|kind| categories.contains(&kind.category()))
            .collect()
    }
}
