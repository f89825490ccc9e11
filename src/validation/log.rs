//! Deferred validation log.
//!
//! Problems found while classifying a type are recorded here instead of being
//! reported directly. The log is later replayed into a [`ValidationContext`],
//! optionally under an owner property path, so the same classification result
//! can be reported for every place the type is nested without recomputing it.

use crate::validation::context::ValidationContext;
use crate::validation::problem::{ProblemKind, Severity, ValidationProblem};

/// A problem recorded at classification time, rendered at replay time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeferredProblem {
    kind: ProblemKind,
    severity: Severity,
    property: Option<String>,
    description: String,
    long_description: Option<String>,
    reason: String,
    solutions: Vec<String>,
}

impl DeferredProblem {
    pub fn kind(&self) -> ProblemKind {
        self.kind
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Property name relative to the type that recorded the problem.
    pub fn property(&self) -> Option<&str> {
        self.property.as_deref()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn long_description(&self) -> Option<&str> {
        self.long_description.as_deref()
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub fn solutions(&self) -> &[String] {
        &self.solutions
    }

    /// Render this record, prefixing the property with `owner_path` when given.
    pub fn render(&self, owner_path: Option<&str>) -> ValidationProblem {
        let property = match (owner_path, &self.property) {
            (Some(owner), Some(property)) => Some(format!("{}.{}", owner, property)),
            (Some(owner), None) => Some(owner.to_string()),
            (None, property) => property.clone(),
        };
        ValidationProblem {
            kind: self.kind,
            severity: self.severity,
            type_name: None,
            property,
            description: self.description.clone(),
            long_description: self.long_description.clone(),
            reason: self.reason.clone(),
            solutions: self.solutions.clone(),
            doc_anchor: self.kind.doc_anchor(),
        }
    }
}

/// Builder handed to [`ValidationLog::report`].
#[derive(Debug)]
pub struct ProblemBuilder {
    problem: DeferredProblem,
}

impl ProblemBuilder {
    fn new(kind: ProblemKind) -> Self {
        ProblemBuilder {
            problem: DeferredProblem {
                kind,
                severity: Severity::Error,
                property: None,
                description: String::new(),
                long_description: None,
                reason: String::new(),
                solutions: Vec::new(),
            },
        }
    }

    pub fn property(mut self, name: impl Into<String>) -> Self {
        self.problem.property = Some(name.into());
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.problem.severity = severity;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.problem.description = description.into();
        self
    }

    pub fn long_description(mut self, long_description: impl Into<String>) -> Self {
        self.problem.long_description = Some(long_description.into());
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.problem.reason = reason.into();
        self
    }

    pub fn solution(mut self, solution: impl Into<String>) -> Self {
        self.problem.solutions.push(solution.into());
        self
    }
}

/// Ordered, append-only record of problems for one type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationLog {
    problems: Vec<DeferredProblem>,
}

impl ValidationLog {
    pub fn new() -> Self {
        ValidationLog::default()
    }

    /// Record a problem of `kind`, filled in by `build`.
    pub fn report(&mut self, kind: ProblemKind, build: impl FnOnce(ProblemBuilder) -> ProblemBuilder) {
        let problem = build(ProblemBuilder::new(kind)).problem;
        tracing::trace!(
            kind = %problem.kind,
            property = problem.property.as_deref().unwrap_or("<type>"),
            "recorded validation problem"
        );
        self.problems.push(problem);
    }

    /// Replay every problem into `context`, in recording order.
    pub fn replay(&self, owner_path: Option<&str>, context: &mut dyn ValidationContext) {
        for problem in &self.problems {
            context.visit_problem(problem.render(owner_path));
        }
    }

    pub fn problems(&self) -> &[DeferredProblem] {
        &self.problems
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    /// Number of problems of a given kind.
    pub fn count_of(&self, kind: ProblemKind) -> usize {
        self.problems.iter().filter(|p| p.kind == kind).count()
    }
}
