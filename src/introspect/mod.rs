//! Type introspection - the collaborator that supplies declared properties.
//!
//! The engine never inspects types itself. An introspector canonicalizes
//! generated wrapper types to their public type, enumerates declared
//! properties with their markers, and may report type-level structural
//! problems.

pub mod catalog;

use std::collections::BTreeSet;

use crate::core::property::{PropertyDescriptor, TypeMarker, TypeName};
use crate::validation::log::ValidationLog;

pub use catalog::{CatalogError, PropertyDefinition, TypeCatalog, TypeDefinition};

/// Supplies property descriptors for component types.
pub trait TypeIntrospector: Send + Sync {
    /// Strip generated wrapping, returning the public type used as cache key.
    fn canonicalize(&self, ty: &TypeName) -> TypeName {
        ty.clone()
    }

    /// Declared properties of `ty`, in declaration order.
    fn properties(&self, ty: &TypeName) -> Vec<PropertyDescriptor>;

    /// Markers declared on `ty` itself.
    fn type_markers(&self, ty: &TypeName) -> BTreeSet<TypeMarker>;

    /// Type-level structural validation. Problems are appended to `log`.
    fn validate_type(&self, _ty: &TypeName, _log: &mut ValidationLog) {}
}
