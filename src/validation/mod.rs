//! Validation problems, the deferred validation log and reporting contexts.

pub mod context;
pub mod log;
pub mod problem;

pub use context::{ProblemCollector, ValidationContext};
pub use log::{DeferredProblem, ProblemBuilder, ValidationLog};
pub use problem::{
    join_for_display, ProblemKind, Severity, ValidationProblem, DEFAULT_DOCUMENTATION_BASE,
};
