//! Handler for the generic `Input` role.

use crate::capability::handler::CapabilityHandler;
use crate::capability::rules::validate_unsupported_value_types;
use crate::capability::visitor::PropertyVisitor;
use crate::core::marker::{MarkerCategory, MarkerKind};
use crate::core::property::PropertyDescriptor;
use crate::validation::log::ValidationLog;
use crate::validation::problem::ProblemKind;

/// Plain value inputs, tracked by value for up-to-date checks.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        InputHandler
    }
}

impl CapabilityHandler for InputHandler {
    fn role(&self) -> MarkerKind {
        MarkerKind::Input
    }

    fn allowed_modifiers(&self) -> &'static [MarkerCategory] {
        &[MarkerCategory::Optional]
    }

    fn validate(&self, property: &PropertyDescriptor, log: &mut ValidationLog) {
        validate_unsupported_value_types(MarkerKind::Input, property, log);

        let value_type = property.value_type();
        if value_type.is_file_like() {
            log.report(ProblemKind::IncorrectCapabilityUsage, |p| {
                p.property(property.name())
                    .description(format!(
                        "has Input marker used on property of type '{}'",
                        value_type
                    ))
                    .reason(format!(
                        "A property of type '{}' marked with Input cannot determine how to interpret the file",
                        value_type
                    ))
                    .solution("Mark it as InputFile for regular files")
                    .solution("Mark it as InputDirectory for directories")
                    .solution("If you want to track the path, capture it as a String and keep Input")
            });
        }

        if value_type.is_primitive() && property.is_optional() {
            log.report(ProblemKind::InvalidModifierForType, |p| {
                p.property(property.name())
                    .description(format!("of type {} shouldn't be marked as Optional", value_type))
                    .reason("Properties of primitive type cannot be optional")
                    .solution("Remove the Optional marker")
                    .solution(format!("Use the Provider<{}> type instead", value_type))
            });
        }
    }

    fn visit(&self, property: &PropertyDescriptor, visitor: &mut dyn PropertyVisitor) {
        visitor.visit_input_property(property.name(), property.is_optional());
    }
}
