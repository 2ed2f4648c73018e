use downcast_rs::impl_downcast;
use downcast_rs::Downcast;
use dyn_clone::clone_trait_object;
use dyn_clone::DynClone;

use super::Domains;
use super::LocalId;
use super::NotificationContext;
use super::PropagationContext;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::notifications::DomainEvent;
#[cfg(doc)]
use crate::propagation::PropagatorConstructorContext;
use crate::statistics::StatisticLogger;

// Allows the state to hand out the concrete type behind a `Box<dyn Propagator>`.
impl_downcast!(Propagator);
// Cloning the state clones every propagator in it.
clone_trait_object!(Propagator);

/// A propagator removes values from domains which cannot be part of any solution, or reports
/// that the current domains are inconsistent.
///
/// Only [`Propagator::name`] and [`Propagator::propagate_from_scratch`] are required; the other
/// functions have default implementations.
pub trait Propagator: Downcast + DynClone {
    /// The name of the propagator, used for printing.
    fn name(&self) -> &str;

    /// Performs propagation without relying on incremental data structures.
    ///
    /// Values which cannot be part of any solution are removed with
    /// [`PropagationContext::post`]. A detected inconsistency is returned as an error, either as
    /// the empty domain produced by a post or as an explicit conflict.
    ///
    /// Propagators are not required to reach a fixed point in one call; the engine calls them
    /// again as long as domains keep changing.
    fn propagate_from_scratch(&self, context: PropagationContext) -> PropagationStatusCP;

    /// Performs propagation while updating internal data structures.
    ///
    /// By default, this calls [`Propagator::propagate_from_scratch`].
    fn propagate(&mut self, context: PropagationContext) -> PropagationStatusCP {
        self.propagate_from_scratch(context)
    }

    /// Called when an event the propagator registered for (through
    /// [`PropagatorConstructorContext::register`]) happens. Decides whether the propagator should
    /// be enqueued.
    ///
    /// This should only contain cheap bookkeeping; the work belongs in
    /// [`Propagator::propagate`]. By default the propagator is always enqueued.
    fn notify(
        &mut self,
        _context: NotificationContext,
        _local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after backtracking, so that internal data structures can be brought in line with
    /// the restored domains.
    fn synchronise(&mut self, _context: NotificationContext) {}

    /// The [`Priority`] of the propagator; cheap propagators should run first.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Whether the constraint is certainly satisfied by every completion of the current domains.
    ///
    /// There is no "violated" verdict: infeasibility is reported as a conflict during
    /// propagation.
    fn entailment(&self, _domains: Domains) -> Entailment {
        Entailment::Undetermined
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}

/// Outcome of [`Propagator::entailment`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entailment {
    Satisfied,
    Undetermined,
}

/// The priority of a propagator, used for determining the order in which propagators will be
/// called. Propagators with the same priority run in the order in which they were enqueued.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        (*self as u8).partial_cmp(&(*other as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::Priority;

    #[test]
    fn priorities_are_ordered_by_urgency() {
        assert!(Priority::High < Priority::Medium);
        assert!(Priority::Low < Priority::VeryLow);
        assert_eq!(Priority::default(), Priority::VeryLow);
    }
}
