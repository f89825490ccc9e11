//! The capability handler contract.

use crate::capability::visitor::PropertyVisitor;
use crate::core::marker::{MarkerCategory, MarkerKind};
use crate::core::property::PropertyDescriptor;
use crate::validation::log::ValidationLog;

/// Behavior for properties carrying one role marker.
///
/// Handlers are stateless. Validation never fails: problems are appended to
/// the log and classification carries on.
pub trait CapabilityHandler: Send + Sync {
    /// The role marker kind this handler serves.
    fn role(&self) -> MarkerKind;

    /// Modifier categories accepted on properties of this role.
    fn allowed_modifiers(&self) -> &'static [MarkerCategory];

    /// Whether properties of this role appear in the classified metadata.
    fn is_relevant(&self) -> bool {
        true
    }

    /// Whether this role declares outputs of the component.
    fn is_output(&self) -> bool {
        false
    }

    /// Whether `visitor` should see properties of this role.
    fn should_visit(&self, visitor: &dyn PropertyVisitor) -> bool {
        self.is_output() || !visitor.outputs_only()
    }

    /// Role-specific structural checks.
    fn validate(&self, _property: &PropertyDescriptor, _log: &mut ValidationLog) {}

    /// Surface a classified property to a downstream visitor.
    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor);
}
