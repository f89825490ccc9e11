//! Terminal rendering of validation problems.
//!
//! Every problem is shown with its cause, the fixes that apply and where to
//! read more.

use std::fmt;

use crate::validation::problem::{Severity, ValidationProblem};

/// A problem prepared for the terminal.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// One-line summary
    pub message: String,
    pub severity: Severity,
    /// Notes printed under the summary (`= ...`)
    pub notes: Vec<String>,
    /// Possible solutions, in the order they should be tried
    pub solutions: Vec<String>,
    /// `base#anchor` locator
    pub documentation: String,
}

impl Diagnostic {
    /// Build the diagnostic shown for a validation problem.
    pub fn for_problem(problem: &ValidationProblem, documentation_base: &str) -> Self {
        let mut notes = Vec::new();
        if let Some(long) = &problem.long_description {
            notes.push(long.clone());
        }
        notes.push(format!("reason: {}", problem.reason));

        Diagnostic {
            message: problem.summary(),
            severity: problem.severity,
            notes,
            solutions: problem.solutions.clone(),
            documentation: problem.documentation(documentation_base),
        }
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let label = match (self.severity, color) {
            (Severity::Error, true) => "\x1b[1;31merror\x1b[0m",
            (Severity::Warning, true) => "\x1b[1;33mwarning\x1b[0m",
            (Severity::Error, false) => "error",
            (Severity::Warning, false) => "warning",
        };

        let mut output = format!("{}: {}\n", label, self.message);
        for note in &self.notes {
            output.push_str(&format!("  = {}\n", note));
        }

        match self.solutions.as_slice() {
            [] => {}
            [only] => output.push_str(&format!("{}: {}\n", help_label(color), only)),
            solutions => {
                output.push_str(&format!("{}: consider:\n", help_label(color)));
                for (i, solution) in solutions.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, solution));
                }
            }
        }

        output.push_str(&format!("  see {}\n", self.documentation));
        output
    }
}

fn help_label(color: bool) -> &'static str {
    if color {
        "\x1b[1;32mhelp\x1b[0m"
    } else {
        "help"
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
