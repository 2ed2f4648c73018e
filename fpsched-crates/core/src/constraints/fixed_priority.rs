use crate::basic_types::ConfigurationError;
use crate::basic_types::ConstraintOperationError;
use crate::constraints::Constraint;
use crate::propagation::Domains;
use crate::propagation::PropagatorHandle;
use crate::propagation::ReadDomains;
use crate::propagators::fixed_priority::FixedPriorityOptions;
use crate::propagators::fixed_priority::FixedPrioritySchedulabilityArgs;
use crate::propagators::fixed_priority::FixedPrioritySchedulabilityPropagator;
use crate::variables::IntegerVariable;
use crate::Solver;

/// One periodic task of a [`FixedPriorityWorkload`].
#[derive(Clone, Debug)]
pub struct FixedPriorityTask<Var> {
    /// Static priority; its direction is set by
    /// [`PriorityOrdering`](crate::options::PriorityOrdering).
    pub priority: i32,
    /// Minimum inter-arrival time of the jobs; strictly positive.
    pub period: i64,
    /// The scheduler the task is mapped to.
    pub execution: Var,
    /// Time the task can be blocked by lower-priority tasks.
    pub blocking: Var,
    /// Worst-case execution time of one job.
    pub duration: Var,
    /// Worst-case response time of the task.
    pub response: Var,
}

/// The tasks competing for the schedulers of a system, as parallel arrays indexed by task.
///
/// The same workload is shared by the constraints of every scheduler.
#[derive(Clone, Debug)]
pub struct FixedPriorityWorkload<Var> {
    pub priorities: Vec<i32>,
    pub periods: Vec<i64>,
    pub execution: Vec<Var>,
    pub blocking: Vec<Var>,
    pub duration: Vec<Var>,
    pub response: Vec<Var>,
}

impl<Var> Default for FixedPriorityWorkload<Var> {
    fn default() -> Self {
        FixedPriorityWorkload {
            priorities: Vec::new(),
            periods: Vec::new(),
            execution: Vec::new(),
            blocking: Vec::new(),
            duration: Vec::new(),
            response: Vec::new(),
        }
    }
}

impl<Var> FixedPriorityWorkload<Var> {
    /// Adds a task and returns its index.
    pub fn push_task(&mut self, task: FixedPriorityTask<Var>) -> usize {
        self.priorities.push(task.priority);
        self.periods.push(task.period);
        self.execution.push(task.execution);
        self.blocking.push(task.blocking);
        self.duration.push(task.duration);
        self.response.push(task.response);

        self.priorities.len() - 1
    }

    pub fn with_task(mut self, task: FixedPriorityTask<Var>) -> Self {
        let _ = self.push_task(task);
        self
    }

    pub fn num_tasks(&self) -> usize {
        self.priorities.len()
    }

    fn validate_shape(&self) -> Result<(), ConfigurationError> {
        let num_tasks = self.num_tasks();
        if num_tasks == 0 {
            return Err(ConfigurationError::NoTasks);
        }

        let lengths = [
            ("periods", self.periods.len()),
            ("execution", self.execution.len()),
            ("blocking", self.blocking.len()),
            ("duration", self.duration.len()),
            ("response", self.response.len()),
        ];
        if let Some(&(what, actual)) = lengths.iter().find(|(_, length)| *length != num_tasks) {
            return Err(ConfigurationError::LengthMismatch {
                what,
                expected: num_tasks,
                actual,
            });
        }

        if let Some((task, &period)) = self
            .periods
            .iter()
            .enumerate()
            .find(|(_, &period)| period <= 0)
        {
            return Err(ConfigurationError::NonPositivePeriod { task, period });
        }

        Ok(())
    }
}

/// Creates the constraint that every task mapped to `scheduler` meets its response time under
/// fixed-priority preemptive scheduling.
///
/// The workload is checked for equal lengths and strictly positive periods here; negative lower
/// bounds on blocking or duration are reported when the constraint is posted.
///
/// # Example
/// ```rust
/// # use fpsched_core::Solver;
/// # use fpsched_core::constraints::*;
/// let mut solver = Solver::default();
///
/// // A lower priority task with period 10 and a higher priority one with period 5, both mapped
/// // to scheduler 0.
/// let mut workload = FixedPriorityWorkload::default();
/// for (priority, period, duration) in [(1, 10, 4), (2, 5, 2)] {
///     let _ = workload.push_task(FixedPriorityTask {
///         priority,
///         period,
///         execution: solver.new_sparse_integer(vec![0]),
///         blocking: solver.new_bounded_integer(0, 0),
///         duration: solver.new_bounded_integer(duration, duration),
///         response: solver.new_bounded_integer(0, period as i32),
///     });
/// }
///
/// fixed_priority_schedulability(0, &workload, Default::default())
///     .expect("the workload is well-formed")
///     .post(&mut solver)
///     .expect("the tasks are schedulable");
///
/// assert_eq!(solver.upper_bound(&workload.response[0]), 8);
/// assert_eq!(solver.upper_bound(&workload.response[1]), 2);
/// ```
pub fn fixed_priority_schedulability<Var: IntegerVariable>(
    scheduler: i32,
    workload: &FixedPriorityWorkload<Var>,
    options: FixedPriorityOptions,
) -> Result<FixedPrioritySchedulability<Var>, ConfigurationError> {
    workload.validate_shape()?;

    Ok(FixedPrioritySchedulability {
        args: FixedPrioritySchedulabilityArgs {
            scheduler,
            priorities: workload.priorities.clone().into(),
            periods: workload.periods.clone().into(),
            execution: workload.execution.clone().into(),
            blocking: workload.blocking.clone().into(),
            duration: workload.duration.clone().into(),
            response: workload.response.clone().into(),
            options,
        },
    })
}

/// The schedulability constraint of one scheduler; see [`fixed_priority_schedulability`].
#[derive(Clone, Debug)]
pub struct FixedPrioritySchedulability<Var> {
    args: FixedPrioritySchedulabilityArgs<Var>,
}

impl<Var: IntegerVariable + 'static> FixedPrioritySchedulability<Var> {
    /// Checks that no blocking time or duration can be negative in `domains`.
    pub fn check_bounds(&self, domains: Domains<'_>) -> Result<(), ConfigurationError> {
        for (what, vars) in [("blocking", &self.args.blocking), ("duration", &self.args.duration)] {
            for (task, var) in vars.iter().enumerate() {
                let value = domains.lower_bound(var);
                if value < 0 {
                    return Err(ConfigurationError::NegativeBound { task, what, value });
                }
            }
        }

        Ok(())
    }

    /// Posts the constraint and returns the handle of its propagator, through which its
    /// analysis can be inspected with [`Solver::get_propagator`].
    pub fn post_with_handle(
        self,
        solver: &mut Solver,
    ) -> Result<PropagatorHandle<FixedPrioritySchedulabilityPropagator<Var>>, ConstraintOperationError>
    {
        self.check_bounds(solver.get_state().get_domains())?;
        solver.add_propagator(self.args)
    }

    /// The propagator arguments, for adding the constraint to a
    /// [`State`](crate::state::State) directly. Bounds are not checked.
    pub fn into_args(self) -> FixedPrioritySchedulabilityArgs<Var> {
        self.args
    }
}

impl<Var: IntegerVariable + 'static> Constraint for FixedPrioritySchedulability<Var> {
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        self.post_with_handle(solver).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variables::DomainId;

    fn workload(solver: &mut Solver, periods: &[i64]) -> FixedPriorityWorkload<DomainId> {
        let mut workload = FixedPriorityWorkload::default();
        for (index, &period) in periods.iter().enumerate() {
            let _ = workload.push_task(FixedPriorityTask {
                priority: index as i32,
                period,
                execution: solver.new_sparse_integer(vec![0, 1]),
                blocking: solver.new_bounded_integer(0, 1),
                duration: solver.new_bounded_integer(1, 2),
                response: solver.new_bounded_integer(0, 50),
            });
        }
        workload
    }

    #[test]
    fn empty_workload_is_rejected() {
        let workload = FixedPriorityWorkload::<DomainId>::default();

        assert_eq!(
            fixed_priority_schedulability(0, &workload, Default::default()).err(),
            Some(ConfigurationError::NoTasks)
        );
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let mut solver = Solver::default();
        let mut workload = workload(&mut solver, &[10, 20]);
        let _ = workload.duration.pop();

        assert_eq!(
            fixed_priority_schedulability(0, &workload, Default::default()).err(),
            Some(ConfigurationError::LengthMismatch {
                what: "duration",
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn non_positive_periods_are_rejected() {
        let mut solver = Solver::default();
        let workload = workload(&mut solver, &[10, 0]);

        assert_eq!(
            fixed_priority_schedulability(0, &workload, Default::default()).err(),
            Some(ConfigurationError::NonPositivePeriod { task: 1, period: 0 })
        );
    }

    #[test]
    fn negative_durations_are_rejected_when_posting() {
        let mut solver = Solver::default();
        let mut workload = workload(&mut solver, &[10]);
        workload.duration[0] = solver.new_bounded_integer(-1, 2);

        let constraint = fixed_priority_schedulability(0, &workload, Default::default())
            .expect("the shape is valid");

        assert_eq!(
            constraint.post(&mut solver),
            Err(ConstraintOperationError::InvalidConfiguration(
                ConfigurationError::NegativeBound {
                    task: 0,
                    what: "duration",
                    value: -1
                }
            ))
        );
        assert!(!solver.is_infeasible());
    }

    #[test]
    fn one_constraint_per_scheduler_shares_the_workload() {
        let mut solver = Solver::default();
        let workload = workload(&mut solver, &[10, 20]);

        for scheduler in [0, 1] {
            solver
                .add_constraint(
                    fixed_priority_schedulability(scheduler, &workload, Default::default())
                        .expect("valid workload"),
                )
                .expect("schedulable");
        }

        assert_eq!(solver.get_state().num_propagators(), 2);
    }
}
