//! Handler for `Nested` properties, whose own properties are inspected in turn.

use crate::capability::handler::CapabilityHandler;
use crate::capability::rules::validate_unsupported_value_types;
use crate::capability::visitor::PropertyVisitor;
use crate::core::marker::{MarkerCategory, MarkerKind};
use crate::core::property::PropertyDescriptor;
use crate::validation::log::ValidationLog;

#[derive(Debug, Default)]
pub struct NestedHandler;

impl CapabilityHandler for NestedHandler {
    fn role(&self) -> MarkerKind {
        MarkerKind::Nested
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        &[MarkerCategory::Optional]
    }

    fn validate(&self, property: &PropertyDescriptor, log: &mut ValidationLog) {
        validate_unsupported_value_types(MarkerKind::Nested, property, log);
    }

    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor) {
        visitor.visit_nested(property.name(), property.is_optional());
    }
}
