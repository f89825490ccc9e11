//! Property and type descriptors as supplied by the type introspector.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::marker::{Marker, MarkerCategory, MarkerKind};
use crate::core::value_type::ValueType;

/// Name of a component type, used as the metadata cache key.
///
/// Cloning is cheap: the name is reference counted.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct TypeName(Arc<str>);

impl TypeName {
    pub fn new(name: impl AsRef<str>) -> Self {
        TypeName(Arc::from(name.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        TypeName::new(s)
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        TypeName(Arc::from(s))
    }
}

impl From<TypeName> for String {
    fn from(name: TypeName) -> Self {
        name.0.to_string()
    }
}

/// Declarative markers placed on a type rather than on one of its properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TypeMarker {
    /// Outputs of this transform may be reused across builds and machines
    CacheableTransform,
}

/// A declared property of a type together with its markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyDescriptor {
    name: String,
    value_type: ValueType,
    markers: BTreeMap<MarkerCategory, Marker>,
}

impl PropertyDescriptor {
    /// Create a property without markers.
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        PropertyDescriptor {
            name: name.into(),
            value_type,
            markers: BTreeMap::new(),
        }
    }

    /// Attach a marker, replacing any marker already present in its category.
    pub fn with_marker(mut self, marker: impl Into<Marker>) -> Self {
        self.insert_marker(marker.into());
        self
    }

    /// Attach a marker in place, returning the one it replaced.
    pub fn insert_marker(&mut self, marker: Marker) -> Option<Marker> {
        self.markers.insert(marker.category(), marker)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// The marker attached in `category`, if any.
    pub fn marker(&self, category: MarkerCategory) -> Option<&Marker> {
        self.markers.get(&category)
    }

    /// Whether a marker of exactly this kind is attached.
    pub fn has_marker(&self, kind: MarkerKind) -> bool {
        self.marker(kind.category())
            .is_some_and(|marker| marker.kind() == kind)
    }

    /// All attached markers, ordered by category.
    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    pub fn is_optional(&self) -> bool {
        self.has_marker(MarkerKind::Optional)
    }
}
