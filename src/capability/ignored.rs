//! Handlers for roles that are recognized but take no part in execution.

use crate::capability::handler::CapabilityHandler;
use crate::capability::visitor::PropertyVisitor;
use crate::core::marker::{MarkerCategory, MarkerKind};
use crate::core::property::PropertyDescriptor;

/// `Internal`, `Console` and `ReplacedBy` properties.
///
/// They are classified so they do not trigger a missing-marker problem, but
/// they never appear in the metadata.
#[derive(Debug)]
pub struct IgnoredHandler {
    role: MarkerKind,
}

impl IgnoredHandler {
    pub fn internal() -> Self {
        IgnoredHandler {
            role: MarkerKind::Internal,
        }
    }

    pub fn console() -> Self {
        IgnoredHandler {
            role: MarkerKind::Console,
        }
    }

    pub fn replaced_by() -> Self {
        IgnoredHandler {
            role: MarkerKind::ReplacedBy,
        }
    }
}

impl CapabilityHandler for IgnoredHandler {
    fn role(&self) -> MarkerKind {
        self.role
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        &[]
    }

    fn is_relevant(&self) -> bool {
        false
    }

    fn should_visit(&self, _visitor: &dyn PropertyVisitor) -> bool {
        false
    }

    fn visit(&self, _property: &PropertyDescriptor, _visitor: &mut dyn PropertyVisitor) {}
}
