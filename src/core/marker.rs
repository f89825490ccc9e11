//! Capability markers - the declarative tags attached to properties.
//!
//! Markers are grouped into categories. A property carries at most one marker
//! per category: the `Type` category holds the role (Input, OutputFile, ...),
//! every other category holds a modifier (Optional, PathSensitive, ...).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of a marker. Markers in the same category are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerCategory {
    /// Role markers (Input, InputFile, OutputDirectory, ...)
    Type,
    /// The property may be absent
    Optional,
    /// Incremental change tracking and skip-when-empty
    Incremental,
    /// Normalization strategy for file inputs
    Normalization,
    /// Whether empty directories are fingerprinted
    DirectorySensitivity,
    /// Whether line endings are fingerprinted
    LineEndingSensitivity,
}

impl MarkerCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerCategory::Type => "type",
            MarkerCategory::Optional => "optional",
            MarkerCategory::Incremental => "incremental",
            MarkerCategory::Normalization => "normalization",
            MarkerCategory::DirectorySensitivity => "directory-sensitivity",
            MarkerCategory::LineEndingSensitivity => "line-ending-sensitivity",
        }
    }
}

impl fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discriminator of a marker, used for handler lookup and modifier whitelisting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarkerKind {
    // Roles
    Input,
    InputFile,
    InputFiles,
    InputDirectory,
    Nested,
    OutputFile,
    OutputFiles,
    OutputDirectory,
    OutputDirectories,
    Destroys,
    LocalState,
    Internal,
    Console,
    ReplacedBy,
    InputArtifact,
    InputArtifactDependencies,

    // Modifiers
    Optional,
    Incremental,
    SkipWhenEmpty,
    PathSensitive,
    Classpath,
    CompileClasspath,
    IgnoreEmptyDirectories,
    NormalizeLineEndings,
}

impl MarkerKind {
    /// All marker kinds, roles first.
    pub const ALL: &'static [MarkerKind] = &[
        MarkerKind::Input,
        MarkerKind::InputFile,
        MarkerKind::InputFiles,
        MarkerKind::InputDirectory,
        MarkerKind::Nested,
        MarkerKind::OutputFile,
        MarkerKind::OutputFiles,
        MarkerKind::OutputDirectory,
        MarkerKind::OutputDirectories,
        MarkerKind::Destroys,
        MarkerKind::LocalState,
        MarkerKind::Internal,
        MarkerKind::Console,
        MarkerKind::ReplacedBy,
        MarkerKind::InputArtifact,
        MarkerKind::InputArtifactDependencies,
        MarkerKind::Optional,
        MarkerKind::Incremental,
        MarkerKind::SkipWhenEmpty,
        MarkerKind::PathSensitive,
        MarkerKind::Classpath,
        MarkerKind::CompileClasspath,
        MarkerKind::IgnoreEmptyDirectories,
        MarkerKind::NormalizeLineEndings,
    ];

    /// The category this kind of marker belongs to.
    pub fn category(&self) -> MarkerCategory {
        match self {
            MarkerKind::Optional => MarkerCategory::Optional,
            MarkerKind::Incremental | MarkerKind::SkipWhenEmpty => MarkerCategory::Incremental,
            MarkerKind::PathSensitive | MarkerKind::Classpath | MarkerKind::CompileClasspath => {
                MarkerCategory::Normalization
            }
            MarkerKind::IgnoreEmptyDirectories => MarkerCategory::DirectorySensitivity,
            MarkerKind::NormalizeLineEndings => MarkerCategory::LineEndingSensitivity,
            _ => MarkerCategory::Type,
        }
    }

    /// Whether this kind is a role (category `Type`).
    pub fn is_role(&self) -> bool {
        self.category() == MarkerCategory::Type
    }

    /// Marker kinds belonging to a category.
    pub fn in_category(category: MarkerCategory) -> impl Iterator<Item = MarkerKind> {
        Self::ALL
            .iter()
            .copied()
            .filter(move |kind| kind.category() == category)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarkerKind::Input => "Input",
            MarkerKind::InputFile => "InputFile",
            MarkerKind::InputFiles => "InputFiles",
            MarkerKind::InputDirectory => "InputDirectory",
            MarkerKind::Nested => "Nested",
            MarkerKind::OutputFile => "OutputFile",
            MarkerKind::OutputFiles => "OutputFiles",
            MarkerKind::OutputDirectory => "OutputDirectory",
            MarkerKind::OutputDirectories => "OutputDirectories",
            MarkerKind::Destroys => "Destroys",
            MarkerKind::LocalState => "LocalState",
            MarkerKind::Internal => "Internal",
            MarkerKind::Console => "Console",
            MarkerKind::ReplacedBy => "ReplacedBy",
            MarkerKind::InputArtifact => "InputArtifact",
            MarkerKind::InputArtifactDependencies => "InputArtifactDependencies",
            MarkerKind::Optional => "Optional",
            MarkerKind::Incremental => "Incremental",
            MarkerKind::SkipWhenEmpty => "SkipWhenEmpty",
            MarkerKind::PathSensitive => "PathSensitive",
            MarkerKind::Classpath => "Classpath",
            MarkerKind::CompileClasspath => "CompileClasspath",
            MarkerKind::IgnoreEmptyDirectories => "IgnoreEmptyDirectories",
            MarkerKind::NormalizeLineEndings => "NormalizeLineEndings",
        }
    }
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MarkerKind {
    type Err = MarkerKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkerKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| MarkerKindParseError(s.to_string()))
    }
}

/// Error returned when parsing an unknown marker kind.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown marker kind `{0}`")]
pub struct MarkerKindParseError(pub String);

/// Path sensitivity argument of the `PathSensitive` marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathSensitivity {
    /// Full absolute path
    Absolute,
    /// Path relative to the root of the file tree
    Relative,
    /// File name only
    NameOnly,
    /// Content only, the path is ignored
    None,
}

/// A marker instance attached to a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Marker {
    kind: MarkerKind,
    path_sensitivity: Option<PathSensitivity>,
}

impl Marker {
    pub fn new(kind: MarkerKind) -> Self {
        Marker {
            kind,
            path_sensitivity: None,
        }
    }

    /// A `PathSensitive` marker with the given sensitivity.
    pub fn path_sensitive(sensitivity: PathSensitivity) -> Self {
        Marker {
            kind: MarkerKind::PathSensitive,
            path_sensitivity: Some(sensitivity),
        }
    }

    pub fn kind(&self) -> MarkerKind {
        self.kind
    }

    pub fn category(&self) -> MarkerCategory {
        self.kind.category()
    }

    /// Sensitivity argument, only set for `PathSensitive`.
    pub fn path_sensitivity(&self) -> Option<PathSensitivity> {
        self.path_sensitivity
    }
}

impl From<MarkerKind> for Marker {
    fn from(kind: MarkerKind) -> Self {
        Marker::new(kind)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path_sensitivity {
            Some(sensitivity) => write!(f, "{}({:?})", self.kind, sensitivity),
            None => write!(f, "{}", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_categories() {
        assert_eq!(MarkerKind::InputFiles.category(), MarkerCategory::Type);
        assert_eq!(MarkerKind::Classpath.category(), MarkerCategory::Normalization);
        assert_eq!(MarkerKind::SkipWhenEmpty.category(), MarkerCategory::Incremental);
        assert!(MarkerKind::InputArtifact.is_role());
        assert!(!MarkerKind::Optional.is_role());
    }

    #[test]
    fn test_marker_kind_parse() {
        assert_eq!("InputFiles".parse::<MarkerKind>().unwrap(), MarkerKind::InputFiles);
        assert_eq!("optional".parse::<MarkerKind>().unwrap(), MarkerKind::Optional);
        assert!("Inject".parse::<MarkerKind>().is_err());
    }

    #[test]
    fn test_normalization_kinds() {
        let kinds: Vec<_> = MarkerKind::in_category(MarkerCategory::Normalization).collect();
        assert_eq!(
            kinds,
            vec![
                MarkerKind::PathSensitive,
                MarkerKind::Classpath,
                MarkerKind::CompileClasspath
            ]
        );
    }

    #[test]
    fn test_marker_display() {
        assert_eq!(Marker::new(MarkerKind::Input).to_string(), "Input");
        assert_eq!(
            Marker::path_sensitive(PathSensitivity::Relative).to_string(),
            "PathSensitive(Relative)"
        );
    }
}
