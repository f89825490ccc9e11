//! mooring - property capability classification for build components
//!
//! This crate interprets the declarative markers placed on the properties of
//! task-like and transform-like component types. It classifies every property
//! into the role it plays during execution, validates marker combinations,
//! caches the resulting type metadata and uses it to register artifact
//! transforms.

pub mod capability;
pub mod core;
pub mod introspect;
pub mod store;
pub mod transform;
pub mod util;
pub mod validation;

/// Test utilities and mocks for mooring unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// provides sample catalogs, a counting introspector and recording transform
/// services.
#[cfg(test)]
pub mod test_support;

pub use capability::{HandlerRegistry, InspectionScheme, PropertyVisitor, SchemeKind};
pub use core::{AttributeSet, MarkerKind, PropertyDescriptor, TypeName, ValueType};
pub use introspect::{TypeCatalog, TypeIntrospector};
pub use store::{Memoization, PropertyCapabilityStore, TypeMetadata};
pub use transform::{RegistrationError, TransformRegistrationFactory, TransformRegistry};
pub use util::config::Config;
pub use validation::{ProblemCollector, ValidationContext, ValidationLog, ValidationProblem};
