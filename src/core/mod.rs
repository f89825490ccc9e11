//! Core data structures for mooring.
//!
//! This module contains the capability marker model:
//! - Markers, their categories and path sensitivity
//! - Declared value types
//! - Property descriptors and type names
//! - Normalization settings derived from markers
//! - Attribute sets describing artifact variants

pub mod attributes;
pub mod marker;
pub mod normalization;
pub mod property;
pub mod value_type;

pub use attributes::AttributeSet;
pub use marker::{Marker, MarkerCategory, MarkerKind, PathSensitivity};
pub use normalization::{DirectorySensitivity, LineEndingSensitivity, NormalizationSpec, Normalizer};
pub use property::{PropertyDescriptor, TypeMarker, TypeName};
pub use value_type::{PrimitiveKind, ValueType};
