use crate::basic_types::Inconsistency;
use crate::basic_types::PropagatorConflict;
use crate::create_statistics_struct;
use crate::engine::notifications::WatchListDomainEvents;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::engine::PropagatorQueue;
use crate::fpsched_assert_eq_simple;
use crate::fpsched_assert_extreme;
use crate::fpsched_assert_simple;
use crate::predicates::Predicate;
use crate::propagation::store::PropagatorStore;
use crate::propagation::Domains;
use crate::propagation::EnqueueDecision;
use crate::propagation::Entailment;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::PropagatorHandle;
use crate::propagation::PropagatorId;
use crate::results::Solution;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;

/// The container of variables and propagators: the bound store together with the propagators
/// reading from and writing to it.
///
/// Cloning the [`State`] gives an independent snapshot, including every propagator. Branches of a
/// search which run concurrently each work on their own snapshot.
#[derive(Debug, Clone, Default)]
pub struct State {
    /// The current domains of all variables.
    pub(crate) assignments: Assignments,
    /// The propagators; they are queried whenever one of their variables changes.
    pub(crate) propagators: PropagatorStore,
    /// Dictates the order in which propagators will be called to propagate.
    pub(crate) propagator_queue: PropagatorQueue,
    /// Which propagator listens to which events on which domain.
    watch_list: WatchListDomainEvents,

    statistics: StateStatistics,
}

create_statistics_struct!(StateStatistics {
    num_propagators_called: usize,
    /// The number of domain changes made by propagators.
    num_propagations: usize,
    num_conflicts: usize,
    num_restores: usize,
});

/// Information concerning the conflict returned by [`State::propagate_to_fixed_point`].
///
/// Either a propagator explicitly detects a conflict, or it posts a change which empties a
/// domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// A conflict raised explicitly by a propagator.
    Propagator(PropagatorConflict),
    /// A domain would have become empty.
    EmptyDomain(EmptyDomainConflict),
}

impl From<PropagatorConflict> for Conflict {
    fn from(value: PropagatorConflict) -> Self {
        Conflict::Propagator(value)
    }
}

impl From<EmptyDomainConflict> for Conflict {
    fn from(value: EmptyDomainConflict) -> Self {
        Conflict::EmptyDomain(value)
    }
}

/// A conflict because a propagator tried to empty a domain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomainConflict {
    /// The propagator which posted the offending change.
    pub propagator: PropagatorId,
}

impl State {
    pub fn new_interval_variable(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.watch_list.grow();
        self.assignments.grow(lower_bound, upper_bound)
    }

    pub fn new_sparse_variable(&mut self, values: Vec<i32>) -> DomainId {
        self.watch_list.grow();
        self.assignments.create_new_integer_variable_sparse(values)
    }

    pub fn num_variables(&self) -> usize {
        self.assignments.num_domains()
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, variable: Var) -> i32 {
        variable.lower_bound(&self.assignments)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, variable: Var) -> i32 {
        variable.upper_bound(&self.assignments)
    }

    pub fn contains<Var: IntegerVariable>(&self, variable: Var, value: i32) -> bool {
        variable.contains(&self.assignments, value)
    }

    /// Returns the value of `variable` if its domain is a singleton.
    pub fn fixed_value<Var: IntegerVariable>(&self, variable: Var) -> Option<i32> {
        let lower_bound = self.lower_bound(variable.clone());
        (lower_bound == self.upper_bound(variable)).then_some(lower_bound)
    }

    /// `Some(true)` if `predicate` holds in every value of the domain, `Some(false)` if in none.
    pub fn truth_value(&self, predicate: Predicate) -> Option<bool> {
        self.assignments.evaluate_predicate(predicate)
    }

    pub fn get_domains(&self) -> Domains<'_> {
        Domains::new(&self.assignments)
    }

    pub fn get_checkpoint(&self) -> usize {
        self.assignments.get_checkpoint()
    }

    /// Creates a point which [`State::restore_to`] can return to.
    pub fn new_checkpoint(&mut self) {
        self.assignments.new_checkpoint();
    }

    /// Undoes every change made after `checkpoint` was created, and lets every propagator
    /// synchronise with the restored domains.
    pub fn restore_to(&mut self, checkpoint: usize) {
        fpsched_assert_simple!(
            checkpoint < self.get_checkpoint(),
            "restoring to checkpoint {checkpoint} while at checkpoint {}",
            self.get_checkpoint()
        );

        self.statistics.num_restores += 1;
        self.assignments.synchronise(checkpoint);
        self.propagator_queue.clear();

        for propagator in self.propagators.iter_propagators_mut() {
            propagator.synchronise(NotificationContext::new(&self.assignments));
        }
    }

    /// Narrows a domain such that `predicate` holds. Propagators are only informed once
    /// [`State::propagate_to_fixed_point`] is called.
    ///
    /// Returns whether the domain changed.
    pub fn post(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        self.assignments.post_predicate(predicate)
    }

    /// Adds a propagator; it is enqueued so that it runs on the next call to
    /// [`State::propagate_to_fixed_point`].
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> PropagatorHandle<Constructor::PropagatorImpl>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        let propagator_id = self.propagators.next_id();

        let context = PropagatorConstructorContext::new(
            &mut self.watch_list,
            &self.assignments,
            propagator_id,
        );
        let propagator = constructor.create(context);
        let priority = propagator.priority();

        let allocated_id = self.propagators.alloc(Box::new(propagator));
        fpsched_assert_eq_simple!(allocated_id, propagator_id);

        self.propagator_queue
            .enqueue_propagator(propagator_id, priority);

        PropagatorHandle::new(propagator_id)
    }

    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.propagators.get_propagator(handle)
    }

    pub fn get_propagator_mut<P: Propagator>(
        &mut self,
        handle: PropagatorHandle<P>,
    ) -> Option<&mut P> {
        self.propagators.get_propagator_mut(handle)
    }

    pub fn num_propagators(&self) -> usize {
        self.propagators.len()
    }

    /// Asks the propagator whether its constraint holds for every completion of the domains.
    pub fn entailment(&self, propagator_id: PropagatorId) -> Entailment {
        self.propagators[propagator_id].entailment(self.get_domains())
    }

    /// Whether every propagator reports [`Entailment::Satisfied`].
    pub fn is_entailed(&self) -> bool {
        self.propagators
            .iter_propagators()
            .all(|propagator| propagator.entailment(self.get_domains()) == Entailment::Satisfied)
    }

    /// Performs fixed-point propagation using the propagators defined in the [`State`].
    ///
    /// Posted predicates and added propagators cause propagators to be enqueued; as these make
    /// further changes more propagators are enqueued, until no propagator changes anything.
    ///
    /// When a conflict is returned the only meaningful operation on the state is
    /// [`State::restore_to`].
    pub fn propagate_to_fixed_point(&mut self) -> Result<(), Conflict> {
        // Changes posted from outside the propagators, e.g. search decisions.
        self.notify_propagators_about_domain_events();

        while let Some(propagator_id) = self.propagator_queue.pop() {
            self.propagate(propagator_id)?;
        }

        fpsched_assert_extreme!(
            self.debug_is_fixed_point(),
            "a propagator can still narrow a domain at the fixed point"
        );

        Ok(())
    }

    pub(crate) fn propagate(&mut self, propagator_id: PropagatorId) -> Result<(), Conflict> {
        self.statistics.num_propagators_called += 1;

        let num_trail_entries_before = self.assignments.num_trail_entries();

        let propagation_status = {
            let propagator = &mut self.propagators[propagator_id];
            let context = PropagationContext::new(&mut self.assignments, propagator_id);
            propagator.propagate(context)
        };

        match propagation_status {
            Ok(()) => {
                self.statistics.num_propagations +=
                    self.assignments.num_trail_entries() - num_trail_entries_before;
                self.notify_propagators_about_domain_events();
                Ok(())
            }
            Err(inconsistency) => {
                self.statistics.num_conflicts += 1;
                self.propagator_queue.clear();
                self.assignments.discard_domain_events();

                Err(match inconsistency {
                    Inconsistency::EmptyDomain => EmptyDomainConflict {
                        propagator: propagator_id,
                    }
                    .into(),
                    Inconsistency::Conflict(conflict) => conflict.into(),
                })
            }
        }
    }

    pub(crate) fn notify_propagators_about_domain_events(&mut self) {
        let State {
            assignments,
            propagators,
            propagator_queue,
            watch_list,
            ..
        } = self;

        let events: Vec<_> = assignments.drain_domain_events().collect();

        for (domain, events) in events {
            for watcher in watch_list.get_affected_propagators(domain) {
                let propagator_id = watcher.propagator_var.propagator;

                for event in (watcher.events & events).iter() {
                    let decision = propagators[propagator_id].notify(
                        NotificationContext::new(assignments),
                        watcher.propagator_var.variable,
                        event,
                    );

                    if decision == EnqueueDecision::Enqueue {
                        let priority = propagators[propagator_id].priority();
                        propagator_queue.enqueue_propagator(propagator_id, priority);
                    }
                }
            }
        }
    }

    /// Runs every propagator from scratch on a copy of the domains and checks that none of them
    /// changes anything.
    fn debug_is_fixed_point(&self) -> bool {
        self.propagators
            .iter_propagators()
            .zip(0_u32..)
            .all(|(propagator, index)| {
                let mut assignments = self.assignments.clone();
                let num_entries_before = assignments.num_trail_entries();
                let status = propagator.propagate_from_scratch(PropagationContext::new(
                    &mut assignments,
                    PropagatorId(index),
                ));

                status.is_ok() && assignments.num_trail_entries() == num_entries_before
            })
    }

    /// A snapshot of the current values. Only meaningful when every variable is fixed.
    pub(crate) fn get_solution(&self) -> Solution {
        Solution::new(
            self.assignments
                .get_domains()
                .map(|domain| self.assignments.get_lower_bound(domain))
                .collect(),
        )
    }

    pub(crate) fn log_statistics(&self, verbose: bool) {
        self.statistics.log(StatisticLogger::new(["engine"]));

        if verbose {
            for (propagator, index) in self.propagators.iter_propagators().zip(0_usize..) {
                propagator.log_statistics(StatisticLogger::new([
                    propagator.name(),
                    "number",
                    index.to_string().as_str(),
                ]));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn restore_undoes_posted_predicates() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 10);

        state.new_checkpoint();
        assert_eq!(state.post(predicate!(x >= 4)), Ok(true));
        assert_eq!(state.lower_bound(x), 4);

        state.restore_to(0);
        assert_eq!(state.lower_bound(x), 0);
    }

    #[test]
    fn clones_are_independent_snapshots() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 10);

        let mut branch = state.clone();
        let _ = branch.post(predicate!(x <= 3));

        assert_eq!(branch.upper_bound(x), 3);
        assert_eq!(state.upper_bound(x), 10);
    }

    #[test]
    fn fixed_value_only_for_singletons() {
        let mut state = State::default();
        let x = state.new_sparse_variable(vec![2, 5]);

        assert_eq!(state.fixed_value(x), None);
        let _ = state.post(predicate!(x != 2));
        assert_eq!(state.fixed_value(x), Some(5));
    }
}
