use super::PropositionalConjunction;
use crate::engine::EmptyDomain;

/// The result of invoking a propagator. Either the propagation succeeds, or it identifies an
/// inconsistency which causes the current search branch to be abandoned.
pub type PropagationStatusCP = Result<(), Inconsistency>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inconsistency {
    /// A posted predicate would have removed every value from a domain.
    EmptyDomain,
    /// The propagator detected that the current domains admit no solution.
    Conflict(PropagatorConflict),
}

impl From<EmptyDomain> for Inconsistency {
    fn from(_: EmptyDomain) -> Self {
        Inconsistency::EmptyDomain
    }
}

impl From<PropagatorConflict> for Inconsistency {
    fn from(conflict: PropagatorConflict) -> Self {
        Inconsistency::Conflict(conflict)
    }
}

/// A conflict stated by a propagator which is _not_ an empty domain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropagatorConflict {
    /// The conjunction that describes the infeasible partial assignment.
    pub conjunction: PropositionalConjunction,
    /// What the propagator found, if it can attribute the conflict to a specific task.
    pub cause: Option<ConflictCause>,
}

impl PropagatorConflict {
    pub fn new(conjunction: impl Into<PropositionalConjunction>) -> Self {
        PropagatorConflict {
            conjunction: conjunction.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: ConflictCause) -> Self {
        self.cause = Some(cause);
        self
    }
}

/// Attribution of a conflict to a single task, so that the caller of the search can report which
/// bound failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConflictCause {
    /// The busy-window iteration for `task` passed `ceiling`, the upper bound of its response
    /// time, at the iterate `computed`.
    Unschedulable {
        task: usize,
        scheduler: i32,
        computed: i64,
        ceiling: i64,
    },
    /// The converged response time of `task` is below the lower bound of its response time.
    ResponseBelowLowerBound {
        task: usize,
        scheduler: i32,
        computed: i64,
        lower_bound: i64,
    },
}

impl ConflictCause {
    pub fn task(&self) -> usize {
        match self {
            ConflictCause::Unschedulable { task, .. }
            | ConflictCause::ResponseBelowLowerBound { task, .. } => *task,
        }
    }
}

impl std::fmt::Display for ConflictCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConflictCause::Unschedulable {
                task,
                scheduler,
                computed,
                ceiling,
            } => write!(
                f,
                "task {task} on scheduler {scheduler} reaches response time {computed}, above its bound {ceiling}"
            ),
            ConflictCause::ResponseBelowLowerBound {
                task,
                scheduler,
                computed,
                lower_bound,
            } => write!(
                f,
                "task {task} on scheduler {scheduler} converges to response time {computed}, below its lower bound {lower_bound}"
            ),
        }
    }
}
