#![cfg(test)]
//! Helpers to set up a specific scenario for a propagator and to observe what it does.
use super::State;
use crate::engine::Conflict;
use crate::predicate;
use crate::propagation::EnqueueDecision;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;
use crate::propagation::PropagatorId;
use crate::variables::DomainId;

/// A [`State`] with convenience functions for testing propagators.
#[derive(Debug, Default)]
pub(crate) struct TestSolver {
    pub(crate) state: State,
}

impl TestSolver {
    pub(crate) fn new_variable(&mut self, lb: i32, ub: i32) -> DomainId {
        self.state.new_interval_variable(lb, ub)
    }

    pub(crate) fn new_sparse_variable(&mut self, values: Vec<i32>) -> DomainId {
        self.state.new_sparse_variable(values)
    }

    /// Adds the propagator and propagates until nothing changes.
    pub(crate) fn new_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, Conflict>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let handle = self.state.add_propagator(constructor);
        self.state.propagate_to_fixed_point()?;
        Ok(handle)
    }

    /// Calls the propagator once, regardless of whether it was enqueued.
    pub(crate) fn propagate(&mut self, propagator: PropagatorId) -> Result<(), Conflict> {
        self.state.notify_propagators_about_domain_events();
        self.state.propagator_queue.clear();
        self.state.propagate(propagator)
    }

    pub(crate) fn lower_bound(&self, var: DomainId) -> i32 {
        self.state.lower_bound(var)
    }

    pub(crate) fn upper_bound(&self, var: DomainId) -> i32 {
        self.state.upper_bound(var)
    }

    pub(crate) fn assert_bounds(&self, var: DomainId, lb: i32, ub: i32) {
        let actual_lb = self.lower_bound(var);
        let actual_ub = self.upper_bound(var);

        assert_eq!(
            (lb, ub),
            (actual_lb, actual_ub),
            "The expected bounds [{lb}..{ub}] did not match the actual bounds [{actual_lb}..{actual_ub}]"
        );
    }

    pub(crate) fn set_lower_bound(&mut self, var: DomainId, bound: i32) {
        let result = self.state.post(predicate!(var >= bound));
        assert!(result.is_ok(), "[{var} >= {bound}] empties the domain");
    }

    pub(crate) fn set_upper_bound(&mut self, var: DomainId, bound: i32) {
        let result = self.state.post(predicate!(var <= bound));
        assert!(result.is_ok(), "[{var} <= {bound}] empties the domain");
    }

    pub(crate) fn remove(&mut self, var: DomainId, value: i32) {
        let result = self.state.post(predicate!(var != value));
        assert!(result.is_ok(), "[{var} != {value}] empties the domain");
    }

    pub(crate) fn decrease_upper_bound_and_notify(
        &mut self,
        propagator: PropagatorId,
        var: DomainId,
        value: i32,
    ) -> EnqueueDecision {
        self.set_upper_bound(var, value);
        self.notify(propagator)
    }

    pub(crate) fn remove_and_notify(
        &mut self,
        propagator: PropagatorId,
        var: DomainId,
        value: i32,
    ) -> EnqueueDecision {
        self.remove(var, value);
        self.notify(propagator)
    }

    fn notify(&mut self, propagator: PropagatorId) -> EnqueueDecision {
        self.state.propagator_queue.clear();
        self.state.notify_propagators_about_domain_events();

        if self.state.propagator_queue.is_propagator_enqueued(propagator) {
            EnqueueDecision::Enqueue
        } else {
            EnqueueDecision::Skip
        }
    }
}
