//! Capability handlers and the schemes that group them.
//!
//! Every role marker kind is served by one [`CapabilityHandler`]. Handlers
//! declare which modifier categories they accept, run role-specific checks and
//! surface classified properties to a [`PropertyVisitor`].

pub mod artifact;
pub mod files;
pub mod handler;
pub mod ignored;
pub mod input;
pub mod nested;
pub mod outputs;
pub mod registry;
pub mod rules;
pub mod scheme;
pub mod visitor;

pub use handler::CapabilityHandler;
pub use registry::HandlerRegistry;
pub use scheme::{InspectionScheme, SchemeKind};
pub use visitor::{
    InputFileKind, InputFileProperty, OutputKind, PlannedProperty, PropertyPlan, PropertyVisitor,
};
