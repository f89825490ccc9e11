//! Immutable classification results.

use std::fmt;
use std::sync::Arc;

use crate::capability::handler::CapabilityHandler;
use crate::capability::visitor::PropertyVisitor;
use crate::core::marker::MarkerKind;
use crate::core::property::{PropertyDescriptor, TypeName};
use crate::validation::context::ValidationContext;
use crate::validation::log::ValidationLog;

/// A property paired with the handler of its effective role.
#[derive(Clone)]
pub struct ClassifiedProperty {
    descriptor: PropertyDescriptor,
    role: MarkerKind,
    handler: Arc<dyn CapabilityHandler>,
}

impl ClassifiedProperty {
    pub(crate) fn new(
        descriptor: PropertyDescriptor,
        role: MarkerKind,
        handler: Arc<dyn CapabilityHandler>,
    ) -> Self {
        ClassifiedProperty {
            descriptor,
            role,
            handler,
        }
    }

    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    pub fn descriptor(&self) -> &PropertyDescriptor {
        &self.descriptor
    }

    /// Effective role, which may be implied by a classpath marker.
    pub fn role(&self) -> MarkerKind {
        self.role
    }

    pub fn handler(&self) -> &dyn CapabilityHandler {
        self.handler.as_ref()
    }

    /// Surface this property to `visitor` if its handler wants to.
    pub fn visit(&self, visitor: &mut dyn PropertyVisitor) {
        if self.handler.should_visit(visitor) {
            self.handler.visit(&self.descriptor, visitor);
        }
    }
}

impl fmt::Debug for ClassifiedProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassifiedProperty")
            .field("descriptor", &self.descriptor)
            .field("role", &self.role)
            .finish()
    }
}

impl PartialEq for ClassifiedProperty {
    fn eq(&self, other: &Self) -> bool {
        self.descriptor == other.descriptor && self.role == other.role
    }
}

/// Validated classification of one component type.
#[derive(Debug)]
pub struct TypeMetadata {
    type_name: TypeName,
    properties: Vec<ClassifiedProperty>,
    problems: ValidationLog,
}

impl TypeMetadata {
    pub(crate) fn new(
        type_name: TypeName,
        properties: Vec<ClassifiedProperty>,
        problems: ValidationLog,
    ) -> Self {
        TypeMetadata {
            type_name,
            properties,
            problems,
        }
    }

    /// Canonical type this metadata describes.
    pub fn type_name(&self) -> &TypeName {
        &self.type_name
    }

    /// Relevant classified properties, in declaration order.
    pub fn properties(&self) -> &[ClassifiedProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&ClassifiedProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }

    /// Properties whose effective role is `role`.
    pub fn properties_with_role(&self, role: MarkerKind) -> impl Iterator<Item = &ClassifiedProperty> {
        self.properties.iter().filter(move |p| p.role == role)
    }

    pub fn problems(&self) -> &ValidationLog {
        &self.problems
    }

    pub fn has_problems(&self) -> bool {
        !self.problems.is_empty()
    }

    /// Replay the classification problems, prefixing property paths with `owner_path`.
    pub fn replay_problems(&self, owner_path: Option<&str>, context: &mut dyn ValidationContext) {
        self.problems.replay(owner_path, context);
    }

    /// Visit every classified property in declaration order.
    pub fn visit(&self, visitor: &mut dyn PropertyVisitor) {
        for property in &self.properties {
            property.visit(visitor);
        }
    }
}
