//! Validation problems reported against component types.

use std::fmt;

use serde::Serialize;

use crate::core::property::TypeName;

/// Page that documentation locators point into unless configured otherwise.
pub const DEFAULT_DOCUMENTATION_BASE: &str = "validation_problems";

/// Kind of validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemKind {
    /// Property has no recognizable role marker
    MissingCapability,
    /// A role or modifier kind is not available in the current context
    UnrecognizedCapabilityInContext,
    /// Modifier category is not allowed for the property's role
    IncompatibleModifier,
    /// Role used with a value type that is semantically wrong for it
    IncorrectCapabilityUsage,
    /// Modifier incompatible with the declared value type
    InvalidModifierForType,
    /// Value type (or its provider argument) is not supported for the role
    UnsupportedValueType,
    /// Cacheable transform selected a non-relocatable normalizer
    CacheabilityViolation,
    /// Two markers of the same category on one property
    ConflictingMarkers,
}

impl ProblemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProblemKind::MissingCapability => "missing-capability",
            ProblemKind::UnrecognizedCapabilityInContext => "unrecognized-capability-in-context",
            ProblemKind::IncompatibleModifier => "incompatible-modifier",
            ProblemKind::IncorrectCapabilityUsage => "incorrect-capability-usage",
            ProblemKind::InvalidModifierForType => "invalid-modifier-for-type",
            ProblemKind::UnsupportedValueType => "unsupported-value-type",
            ProblemKind::CacheabilityViolation => "cacheability-violation",
            ProblemKind::ConflictingMarkers => "conflicting-markers",
        }
    }

    /// Anchor of the documentation section explaining this kind.
    pub fn doc_anchor(&self) -> &'static str {
        match self {
            ProblemKind::MissingCapability => "missing_capability",
            ProblemKind::UnrecognizedCapabilityInContext => "capability_invalid_in_context",
            ProblemKind::IncompatibleModifier => "incompatible_modifiers",
            ProblemKind::IncorrectCapabilityUsage => "incorrect_capability_usage",
            ProblemKind::InvalidModifierForType => "invalid_modifier_for_type",
            ProblemKind::UnsupportedValueType => "unsupported_value_type",
            ProblemKind::CacheabilityViolation => "cacheable_transform_cant_use_absolute_sensitivity",
            ProblemKind::ConflictingMarkers => "conflicting_markers",
        }
    }
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a validation problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A problem rendered against a reporting context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationProblem {
    pub kind: ProblemKind,
    pub severity: Severity,
    /// Root type the problem is reported against, if the context has one
    pub type_name: Option<TypeName>,
    /// Full property path, including any owner prefix
    pub property: Option<String>,
    pub description: String,
    pub long_description: Option<String>,
    pub reason: String,
    pub solutions: Vec<String>,
    pub doc_anchor: &'static str,
}

impl ValidationProblem {
    /// One-line summary, e.g. `Type 'Compile' property 'libs' is missing an input marker.`
    pub fn summary(&self) -> String {
        match (&self.type_name, &self.property) {
            (Some(ty), Some(property)) => {
                format!("Type '{}' property '{}' {}.", ty, property, self.description)
            }
            (Some(ty), None) => format!("Type '{}' {}.", ty, self.description),
            (None, Some(property)) => format!("Property '{}' {}.", property, self.description),
            (None, None) => format!("{}.", capitalize(&self.description)),
        }
    }

    /// Documentation locator, `base#anchor`.
    pub fn documentation(&self, base: &str) -> String {
        format!("{}#{}", base, self.doc_anchor)
    }

    /// Multi-line rendering with reason, solutions and documentation locator.
    pub fn format_full(&self, documentation_base: &str) -> String {
        let mut out = self.summary();
        if let Some(long) = &self.long_description {
            out.push(' ');
            out.push_str(long);
            out.push('.');
        }
        out.push_str(&format!("\n\nReason: {}.", self.reason));
        if !self.solutions.is_empty() {
            let label = if self.solutions.len() == 1 {
                "Possible solution"
            } else {
                "Possible solutions"
            };
            out.push_str(&format!("\n\n{}:", label));
            for (i, solution) in self.solutions.iter().enumerate() {
                out.push_str(&format!("\n  {}. {}.", i + 1, solution));
            }
        }
        out.push_str(&format!(
            "\n\nPlease refer to {} for more details about this problem.",
            self.documentation(documentation_base)
        ));
        out
    }
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Join items for display as `a, b or c`.
pub fn join_for_display<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let items: Vec<S> = items.into_iter().collect();
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.as_ref().to_string(),
        Some((last, rest)) => {
            let head: Vec<&str> = rest.iter().map(|s| s.as_ref()).collect();
            format!("{} or {}", head.join(", "), last.as_ref())
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
