/// Which numeric direction of the static priorities denotes the more urgent task.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PriorityOrdering {
    /// A larger priority value preempts a smaller one.
    #[default]
    HigherValueFirst,
    /// A smaller priority value preempts a larger one (e.g. rate-monotonic ranks).
    LowerValueFirst,
}

/// How two tasks with the same priority value affect each other.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TiePolicy {
    /// Tasks with equal priority interfere with each other; the worst case over any tie-breaking.
    #[default]
    Interfere,
    /// Tasks with equal priority never interfere with each other.
    Independent,
}

/// For which tasks the propagator may tighten the response time or report a contradiction.
///
/// Interference is always computed from every task which can still be mapped to the scheduler.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ResponseTightening {
    /// Only tasks whose execution is fixed to the scheduler. A contradiction is only raised when
    /// the interference which is certain (interferers fixed to the scheduler, lower bounds on
    /// durations and blocking) already exceeds the response-time upper bound.
    #[default]
    WhenAssigned,
    /// Every task for which the scheduler is still a candidate, and a contradiction as soon as the
    /// pessimistic interference exceeds the response-time upper bound. This prunes more, but
    /// assumes that a task will end up on this scheduler whenever it still can.
    WhenCandidate,
}

/// The options of the fixed-priority schedulability propagator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FixedPriorityOptions {
    pub ordering: PriorityOrdering,
    pub ties: TiePolicy,
    pub tightening: ResponseTightening,
}
