use log::debug;
use log::info;

use super::outputs::SatisfactionResult;
use crate::basic_types::ConstraintOperationError;
use crate::branching::Brancher;
use crate::branching::InDomainMin;
use crate::branching::IndependentVariableValueBrancher;
use crate::branching::InputOrder;
use crate::branching::SelectionContext;
use crate::constraints::Constraint;
use crate::create_statistics_struct;
use crate::engine::State;
use crate::fpsched_assert_moderate;
use crate::predicates::Predicate;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;
use crate::statistics::is_statistic_logging_enabled;
use crate::statistics::write_closing_line;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::termination::TerminationCondition;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;

/// Options of the [`Solver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// Whether [`Solver::log_statistics`] includes the statistics of every propagator.
    pub log_propagator_statistics: bool,
}

/// The brancher returned by [`Solver::default_brancher`].
pub type DefaultBrancher = IndependentVariableValueBrancher<DomainId, InputOrder<DomainId>, InDomainMin>;

create_statistics_struct!(SolverStatistics {
    num_decisions: u64,
    num_conflicts: u64,
    num_solutions: u64,
});

/// Creates variables, adds constraints over them, and searches for solutions.
///
/// ```rust
/// # use fpsched_core::Solver;
/// # use fpsched_core::results::SatisfactionResult;
/// # use fpsched_core::termination::Indefinite;
/// let mut solver = Solver::default();
///
/// let x = solver.new_bounded_integer(0, 10);
/// let scheduler = solver.new_sparse_integer(vec![0, 2, 5]);
///
/// let mut brancher = solver.default_brancher();
/// match solver.satisfy(&mut brancher, &mut Indefinite) {
///     SatisfactionResult::Satisfiable(solution) => {
///         assert_eq!(solution.get_integer_value(x), 0);
///         assert_eq!(solution.get_integer_value(scheduler), 0);
///     }
///     other => panic!("expected a solution, got {other:?}"),
/// }
/// ```
///
/// The search is depth-first with chronological backtracking: after a decision fails, the
/// solver returns to the checkpoint before it and posts the negated decision instead.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    state: State,
    options: SolverOptions,
    /// Set once propagation fails without any decision; nothing can be added afterwards.
    is_infeasible: bool,
    statistics: SolverStatistics,
}

impl Solver {
    pub fn with_options(options: SolverOptions) -> Self {
        Solver {
            options,
            ..Default::default()
        }
    }

    /// Creates an integer variable with the domain `[lower_bound, upper_bound]`.
    pub fn new_bounded_integer(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        self.state.new_interval_variable(lower_bound, upper_bound)
    }

    /// Creates an integer variable with exactly the given `values`, e.g. the schedulers a task
    /// can be mapped to.
    pub fn new_sparse_integer(&mut self, values: impl Into<Vec<i32>>) -> DomainId {
        self.state.new_sparse_variable(values.into())
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        self.state.lower_bound(variable.clone())
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, variable: &Var) -> i32 {
        self.state.upper_bound(variable.clone())
    }

    /// The bound store and propagators of the solver.
    pub fn get_state(&self) -> &State {
        &self.state
    }

    pub fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }

    /// Adds `constraint` and propagates. See [`Solver::add_propagator`] for the errors.
    pub fn add_constraint(
        &mut self,
        constraint: impl Constraint,
    ) -> Result<(), ConstraintOperationError> {
        constraint.post(self)
    }

    /// Adds the propagator created by `constructor` and propagates to a fixed point.
    ///
    /// Returns [`ConstraintOperationError::InfeasiblePropagator`] if that propagation fails, after
    /// which the solver is infeasible, and [`ConstraintOperationError::InfeasibleState`] if the
    /// solver already was.
    pub fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, ConstraintOperationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        if self.is_infeasible {
            return Err(ConstraintOperationError::InfeasibleState);
        }

        let handle = self.state.add_propagator(constructor);

        match self.state.propagate_to_fixed_point() {
            Ok(()) => Ok(handle),
            Err(conflict) => {
                self.is_infeasible = true;
                info!("Adding a propagator made the problem infeasible: {conflict:?}");
                Err(ConstraintOperationError::InfeasiblePropagator)
            }
        }
    }

    pub fn get_propagator<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self.state.get_propagator(handle)
    }

    /// Branches on every variable in creation order, smallest value first.
    pub fn default_brancher(&self) -> DefaultBrancher {
        let variables = self.state.assignments.get_domains().collect::<Vec<_>>();
        IndependentVariableValueBrancher::new(InputOrder::new(&variables), InDomainMin)
    }

    /// Searches for an assignment which fixes every variable the `brancher` decides on.
    ///
    /// The domains are restored afterwards, so the solver can be queried or searched again.
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        if self.is_infeasible {
            return SatisfactionResult::Unsatisfiable;
        }

        if let Err(conflict) = self.state.propagate_to_fixed_point() {
            self.is_infeasible = true;
            info!("The problem is infeasible without any decision: {conflict:?}");
            return SatisfactionResult::Unsatisfiable;
        }

        let root = self.state.get_checkpoint();
        // Negated decisions of the first level live here and are undone with the rest.
        self.state.new_checkpoint();

        let result = self.search(brancher, termination);
        self.state.restore_to(root);

        match &result {
            SatisfactionResult::Satisfiable(_) => info!(
                "Found a solution after {} decisions",
                self.statistics.num_decisions
            ),
            SatisfactionResult::Unsatisfiable => {
                self.is_infeasible = true;
                info!(
                    "The search space is exhausted after {} conflicts",
                    self.statistics.num_conflicts
                );
            }
            SatisfactionResult::Unknown => info!("The search was stopped without a conclusion"),
        }

        result
    }

    fn search<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        let search_checkpoint = self.state.get_checkpoint();
        let mut decisions: Vec<Predicate> = Vec::new();

        loop {
            if termination.should_stop() {
                return SatisfactionResult::Unknown;
            }

            let decision =
                brancher.next_decision(&mut SelectionContext::new(&self.state.assignments));

            let Some(decision) = decision else {
                let solution = self.state.get_solution();
                self.statistics.num_solutions += 1;
                brancher.on_solution(&solution);
                return SatisfactionResult::Satisfiable(solution);
            };

            fpsched_assert_moderate!(
                self.state.truth_value(decision) != Some(true),
                "the decision {decision} already holds"
            );

            self.statistics.num_decisions += 1;
            termination.decision_has_been_made();

            self.state.new_checkpoint();
            decisions.push(decision);

            let mut is_consistent = self.post_and_propagate(decision);
            while !is_consistent {
                self.statistics.num_conflicts += 1;
                brancher.on_conflict();

                let Some(refuted) = decisions.pop() else {
                    return SatisfactionResult::Unsatisfiable;
                };

                self.state
                    .restore_to(search_checkpoint + decisions.len());
                is_consistent = self.post_and_propagate(!refuted);
            }
        }
    }

    /// Returns `false` if `predicate` empties a domain or propagation fails afterwards.
    fn post_and_propagate(&mut self, predicate: Predicate) -> bool {
        if self.state.post(predicate).is_err() {
            debug!("Posting {predicate} empties its domain");
            return false;
        }

        match self.state.propagate_to_fixed_point() {
            Ok(()) => true,
            Err(conflict) => {
                debug!("Conflict after {predicate}: {conflict:?}");
                false
            }
        }
    }

    /// Logs the statistics of the search and the engine, if statistic logging is configured.
    pub fn log_statistics(&self) {
        if !is_statistic_logging_enabled() {
            return;
        }

        self.statistics.log(StatisticLogger::new(["solver"]));
        self.state
            .log_statistics(self.options.log_propagator_statistics);
        write_closing_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagators::FixedPrioritySchedulabilityArgs;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;

    #[test]
    fn search_fixes_every_variable() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(2, 4);
        let y = solver.new_sparse_integer(vec![1, 7]);

        let mut brancher = solver.default_brancher();
        let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
        else {
            panic!("expected a solution");
        };

        assert_eq!(solution.get_integer_value(x), 2);
        assert_eq!(solution.get_integer_value(y), 1);

        // The domains are restored after the search.
        assert_eq!((solver.lower_bound(&x), solver.upper_bound(&x)), (2, 4));
    }

    #[test]
    fn exhausted_budget_is_unknown() {
        let mut solver = Solver::default();
        let _ = solver.new_bounded_integer(0, 4);

        let mut brancher = solver.default_brancher();
        assert_eq!(
            solver.satisfy(&mut brancher, &mut DecisionBudget::new(0)),
            SatisfactionResult::Unknown
        );
    }

    #[test]
    fn failing_root_propagation_makes_the_solver_infeasible() {
        let mut solver = Solver::default();
        let execution = solver.new_sparse_integer(vec![0]);
        let blocking = solver.new_bounded_integer(0, 0);
        let duration = solver.new_bounded_integer(3, 3);
        let response = solver.new_bounded_integer(0, 2);

        let args = FixedPrioritySchedulabilityArgs {
            scheduler: 0,
            priorities: [1].into(),
            periods: [10].into(),
            execution: [execution].into(),
            blocking: [blocking].into(),
            duration: [duration].into(),
            response: [response].into(),
            options: Default::default(),
        };

        assert_eq!(
            solver.add_propagator(args.clone()).err(),
            Some(ConstraintOperationError::InfeasiblePropagator)
        );
        assert!(solver.is_infeasible());
        assert_eq!(
            solver.add_constraint(args),
            Err(ConstraintOperationError::InfeasibleState)
        );

        let mut brancher = solver.default_brancher();
        assert_eq!(
            solver.satisfy(&mut brancher, &mut Indefinite),
            SatisfactionResult::Unsatisfiable
        );
    }
}
