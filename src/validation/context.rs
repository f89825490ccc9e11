//! Validation contexts: sinks that receive replayed problems.

use crate::core::property::TypeName;
use crate::validation::problem::ValidationProblem;

/// Sink accepting rendered validation problems.
///
/// Consumers such as up-to-date checking decide what a problem means for them;
/// replaying into a context never fails.
pub trait ValidationContext {
    fn visit_problem(&mut self, problem: ValidationProblem);
}

/// Context that collects problems in order, attributing them to an optional root type.
#[derive(Debug, Clone, Default)]
pub struct ProblemCollector {
    root_type: Option<TypeName>,
    problems: Vec<ValidationProblem>,
}

impl ProblemCollector {
    /// Problems are rendered as `Type 'T' property 'p' ...`.
    pub fn for_root_type(root_type: TypeName) -> Self {
        ProblemCollector {
            root_type: Some(root_type),
            problems: Vec::new(),
        }
    }

    /// Problems are rendered as `Property 'p' ...`.
    pub fn without_root_type() -> Self {
        ProblemCollector::default()
    }

    pub fn problems(&self) -> &[ValidationProblem] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<ValidationProblem> {
        self.problems
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Problem summaries, sorted and deduplicated.
    pub fn sorted_summaries(&self) -> Vec<String> {
        let mut summaries: Vec<String> = self.problems.iter().map(|p| p.summary()).collect();
        summaries.sort();
        summaries.dedup();
        summaries
    }
}

impl ValidationContext for ProblemCollector {
    fn visit_problem(&mut self, mut problem: ValidationProblem) {
        if problem.type_name.is_none() {
            problem.type_name = self.root_type.clone();
        }
        self.problems.push(problem);
    }
}
