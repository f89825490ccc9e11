//! Registry of transform registrations, looked up by attribute pair.

use crate::core::attributes::AttributeSet;
use crate::transform::registration::TransformRegistration;

#[derive(Debug, Default)]
pub struct TransformRegistry {
    registrations: Vec<TransformRegistration>,
}

impl TransformRegistry {
    pub fn new() -> Self {
        TransformRegistry::default()
    }

    pub fn register(&mut self, registration: TransformRegistration) {
        tracing::trace!(
            from = %registration.from_attributes(),
            to = %registration.to_attributes(),
            "adding transform registration"
        );
        self.registrations.push(registration);
    }

    /// Registrations transforming `from` into `to`, in registration order.
    pub fn find(&self, from: &AttributeSet, to: &AttributeSet) -> Vec<&TransformRegistration> {
        self.registrations
            .iter()
            .filter(|r| r.from_attributes() == from && r.to_attributes() == to)
            .collect()
    }

    /// Registrations producing `to`, from any source variant.
    pub fn producing<'a>(
        &'a self,
        to: &'a AttributeSet,
    ) -> impl Iterator<Item = &'a TransformRegistration> + 'a {
        self.registrations
            .iter()
            .filter(move |r| r.to_attributes() == to)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransformRegistration> {
        self.registrations.iter()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
