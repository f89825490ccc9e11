//! Errors raised when registering a transform.

use miette::Diagnostic;
use thiserror::Error;

use crate::core::property::TypeName;
use crate::transform::isolation::IsolationError;
use crate::validation::problem::ValidationProblem;

/// One problem summary, attached to a [`RegistrationError`] as a related diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{0}")]
#[diagnostic(severity(Error))]
pub struct ProblemCause(pub String);

#[derive(Debug, Error, Diagnostic)]
pub enum RegistrationError {
    /// The action or its parameters failed validation.
    #[error("{message}")]
    #[diagnostic(
        code(mooring::transform::invalid_action),
        help("Fix the problems listed below and register the transform again")
    )]
    InvalidAction {
        implementation: TypeName,
        message: String,
        #[related]
        causes: Vec<ProblemCause>,
        problems: Vec<ValidationProblem>,
    },

    #[error("could not isolate parameters of transform action '{implementation}'")]
    #[diagnostic(code(mooring::transform::isolation))]
    Isolation {
        implementation: TypeName,
        #[source]
        source: IsolationError,
    },
}

impl RegistrationError {
    pub(crate) fn invalid_action(
        implementation: &TypeName,
        problems: Vec<ValidationProblem>,
        causes: Vec<String>,
    ) -> Self {
        let message = if causes.len() == 1 {
            format!(
                "A problem was found with the configuration of transform action '{}'.",
                implementation
            )
        } else {
            format!(
                "Some problems were found with the configuration of transform action '{}' ({} problems).",
                implementation,
                causes.len()
            )
        };
        RegistrationError::InvalidAction {
            implementation: implementation.clone(),
            message,
            causes: causes.into_iter().map(ProblemCause).collect(),
            problems,
        }
    }

    pub fn implementation(&self) -> &TypeName {
        match self {
            RegistrationError::InvalidAction { implementation, .. }
            | RegistrationError::Isolation { implementation, .. } => implementation,
        }
    }

    /// Sorted problem summaries; empty for isolation failures.
    pub fn causes(&self) -> Vec<&str> {
        match self {
            RegistrationError::InvalidAction { causes, .. } => {
                causes.iter().map(|c| c.0.as_str()).collect()
            }
            RegistrationError::Isolation { .. } => Vec::new(),
        }
    }

    /// The validation problems behind an invalid action, in report order.
    pub fn problems(&self) -> &[ValidationProblem] {
        match self {
            RegistrationError::InvalidAction { problems, .. } => problems,
            RegistrationError::Isolation { .. } => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singular_message() {
        let err = RegistrationError::invalid_action(
            &TypeName::from("Minify"),
            Vec::new(),
            vec!["Property 'input' is broken.".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "A problem was found with the configuration of transform action 'Minify'."
        );
        assert_eq!(err.causes(), vec!["Property 'input' is broken."]);
    }

    #[test]
    fn test_plural_message() {
        let err = RegistrationError::invalid_action(
            &TypeName::from("Minify"),
            Vec::new(),
            vec!["a".to_string(), "b".to_string()],
        );
        assert_eq!(
            err.to_string(),
            "Some problems were found with the configuration of transform action 'Minify' (2 problems)."
        );
        assert_eq!(err.implementation().as_str(), "Minify");
    }
}
