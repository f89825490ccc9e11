//! File input normalization: which parts of a file's identity are fingerprinted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::marker::{MarkerCategory, MarkerKind, PathSensitivity};
use crate::core::property::PropertyDescriptor;

/// Strategy for reducing a file input's identity to a stable fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Normalizer {
    /// Full absolute path and content
    #[default]
    AbsolutePath,
    /// Path relative to the file tree root and content
    RelativePath,
    /// File name and content
    NameOnly,
    /// Content only
    IgnoredPath,
    /// Runtime classpath semantics (entry order matters, archive contents normalized)
    Classpath,
    /// Compile classpath semantics (only the public API matters)
    CompileClasspath,
}

impl Normalizer {
    /// Whether fingerprints produced by this normalizer survive relocating the build.
    ///
    /// Only the absolute path normalizer embeds machine-specific locations.
    pub fn is_relocatable(&self) -> bool {
        !matches!(self, Normalizer::AbsolutePath)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Normalizer::AbsolutePath => "absolute-path",
            Normalizer::RelativePath => "relative-path",
            Normalizer::NameOnly => "name-only",
            Normalizer::IgnoredPath => "ignored-path",
            Normalizer::Classpath => "classpath",
            Normalizer::CompileClasspath => "compile-classpath",
        }
    }

    /// The normalizer selected by the property's normalization marker, if any.
    pub fn for_property(property: &PropertyDescriptor) -> Option<Normalizer> {
        let marker = property.marker(MarkerCategory::Normalization)?;
        match marker.kind() {
            MarkerKind::Classpath => Some(Normalizer::Classpath),
            MarkerKind::CompileClasspath => Some(Normalizer::CompileClasspath),
            MarkerKind::PathSensitive => Some(match marker.path_sensitivity() {
                Some(PathSensitivity::Relative) => Normalizer::RelativePath,
                Some(PathSensitivity::NameOnly) => Normalizer::NameOnly,
                Some(PathSensitivity::None) => Normalizer::IgnoredPath,
                Some(PathSensitivity::Absolute) | None => Normalizer::AbsolutePath,
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether directories themselves take part in the fingerprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DirectorySensitivity {
    #[default]
    Default,
    IgnoreDirectories,
}

impl DirectorySensitivity {
    pub fn for_property(property: &PropertyDescriptor) -> Self {
        if property.has_marker(MarkerKind::IgnoreEmptyDirectories) {
            DirectorySensitivity::IgnoreDirectories
        } else {
            DirectorySensitivity::Default
        }
    }
}

/// Whether line endings take part in the fingerprint of text files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineEndingSensitivity {
    #[default]
    Default,
    NormalizeLineEndings,
}

impl LineEndingSensitivity {
    pub fn for_property(property: &PropertyDescriptor) -> Self {
        if property.has_marker(MarkerKind::NormalizeLineEndings) {
            LineEndingSensitivity::NormalizeLineEndings
        } else {
            LineEndingSensitivity::Default
        }
    }
}

/// Fully resolved normalization settings for one file input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct NormalizationSpec {
    pub normalizer: Normalizer,
    pub directory_sensitivity: DirectorySensitivity,
    pub line_ending_sensitivity: LineEndingSensitivity,
}
