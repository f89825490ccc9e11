//! Declared value types of properties.
//!
//! Value types are read through a property's accessor. They are printed and
//! parsed as strings such as `int`, `FileCollection` or `Provider<RegularFile>`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Primitive value kinds. Primitive properties always hold a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
}

impl PrimitiveKind {
    const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Char,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Short => "short",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Char => "char",
        }
    }
}

/// The declared value type of a property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueType {
    Primitive(PrimitiveKind),
    String,
    /// A single file-system path
    Path,
    RegularFile,
    Directory,
    FileSystemLocation,
    FileCollection,
    FileTree,
    /// Deferred value wrapper, resolved at execution time
    Provider(Box<ValueType>),
    /// Any other user-defined or library type
    Named(String),
}

impl ValueType {
    /// Wrap a type in a deferred `Provider<T>`.
    pub fn provider(inner: ValueType) -> Self {
        ValueType::Provider(Box::new(inner))
    }

    pub fn named(name: impl Into<String>) -> Self {
        ValueType::Named(name.into())
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ValueType::Primitive(_))
    }

    /// Whether the type denotes files or paths on disk (without unwrapping providers).
    pub fn is_file_like(&self) -> bool {
        matches!(
            self,
            ValueType::Path
                | ValueType::RegularFile
                | ValueType::Directory
                | ValueType::FileSystemLocation
                | ValueType::FileCollection
                | ValueType::FileTree
        )
    }

    /// Unwrap a single level of `Provider<T>`, returning `T`; other types are returned as is.
    pub fn unpack_provider(&self) -> &ValueType {
        match self {
            ValueType::Provider(inner) => inner,
            other => other,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Primitive(kind) => f.write_str(kind.as_str()),
            ValueType::String => f.write_str("String"),
            ValueType::Path => f.write_str("Path"),
            ValueType::RegularFile => f.write_str("RegularFile"),
            ValueType::Directory => f.write_str("Directory"),
            ValueType::FileSystemLocation => f.write_str("FileSystemLocation"),
            ValueType::FileCollection => f.write_str("FileCollection"),
            ValueType::FileTree => f.write_str("FileTree"),
            ValueType::Provider(inner) => write!(f, "Provider<{}>", inner),
            ValueType::Named(name) => f.write_str(name),
        }
    }
}

/// Error returned when a value type string is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueTypeParseError {
    #[error("empty value type")]
    Empty,

    #[error("unbalanced type arguments in `{0}`")]
    Unbalanced(String),
}

impl FromStr for ValueType {
    type Err = ValueTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValueTypeParseError::Empty);
        }

        if let Some(rest) = s.strip_prefix("Provider<") {
            let inner = rest
                .strip_suffix('>')
                .ok_or_else(|| ValueTypeParseError::Unbalanced(s.to_string()))?;
            return Ok(ValueType::provider(inner.parse()?));
        }
        if s.contains('<') != s.contains('>') {
            return Err(ValueTypeParseError::Unbalanced(s.to_string()));
        }

        if let Some(kind) = PrimitiveKind::ALL.iter().find(|kind| kind.as_str() == s) {
            return Ok(ValueType::Primitive(*kind));
        }

        Ok(match s {
            "String" => ValueType::String,
            "Path" => ValueType::Path,
            "RegularFile" => ValueType::RegularFile,
            "Directory" => ValueType::Directory,
            "FileSystemLocation" => ValueType::FileSystemLocation,
            "FileCollection" => ValueType::FileCollection,
            "FileTree" => ValueType::FileTree,
            other => ValueType::Named(other.to_string()),
        })
    }
}

impl TryFrom<String> for ValueType {
    type Error = ValueTypeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ValueType> for String {
    fn from(value: ValueType) -> Self {
        value.to_string()
    }
}
