use thiserror::Error;

/// Malformed input to a schedulability constraint. These are rejected before any propagation
/// takes place and are not recoverable by search.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("The workload does not contain any task")]
    NoTasks,
    #[error("Expected {expected} entries for `{what}` but found {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Task {task} has period {period}, periods have to be strictly positive")]
    NonPositivePeriod { task: usize, period: i64 },
    #[error("The `{what}` of task {task} can be {value}, it has to be non-negative")]
    NegativeBound {
        task: usize,
        what: &'static str,
        value: i32,
    },
}
