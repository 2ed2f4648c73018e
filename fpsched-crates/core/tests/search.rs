//! Mapping tasks to schedulers with the search of the [`Solver`].
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use fpsched_core::branching::InDomainMax;
use fpsched_core::branching::InDomainMin;
use fpsched_core::branching::IndependentVariableValueBrancher;
use fpsched_core::branching::InputOrder;
use fpsched_core::constraints::fixed_priority_schedulability;
use fpsched_core::constraints::Constraint;
use fpsched_core::constraints::FixedPriorityTask;
use fpsched_core::constraints::FixedPriorityWorkload;
use fpsched_core::options::SolverOptions;
use fpsched_core::results::SatisfactionResult;
use fpsched_core::statistics::configure_statistic_logging;
use fpsched_core::termination::DecisionBudget;
use fpsched_core::termination::Indefinite;
use fpsched_core::variables::DomainId;
use fpsched_core::Solver;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Tasks given as `(priority, period, duration)`, each of which can run on any of `schedulers`,
/// with one schedulability constraint per scheduler.
fn set_up_mapping(
    solver: &mut Solver,
    tasks: &[(i32, i64, i32)],
    schedulers: &[i32],
) -> FixedPriorityWorkload<DomainId> {
    init_logging();

    let mut workload = FixedPriorityWorkload::default();
    for &(priority, period, duration) in tasks {
        let _ = workload.push_task(FixedPriorityTask {
            priority,
            period,
            execution: solver.new_sparse_integer(schedulers.to_vec()),
            blocking: solver.new_bounded_integer(0, 0),
            duration: solver.new_bounded_integer(duration, duration),
            response: solver.new_bounded_integer(0, period as i32),
        });
    }

    for &scheduler in schedulers {
        fixed_priority_schedulability(scheduler, &workload, Default::default())
            .expect("the workload is well-formed")
            .post(solver)
            .expect("no conflict before the mapping is decided");
    }

    workload
}

#[test]
fn overloaded_tasks_are_mapped_to_different_schedulers() {
    let mut solver = Solver::default();
    let workload = set_up_mapping(&mut solver, &[(1, 5, 4), (2, 5, 2)], &[0, 1]);

    let mut mapping =
        IndependentVariableValueBrancher::new(InputOrder::new(&workload.execution), InDomainMin);
    let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut mapping, &mut Indefinite)
    else {
        panic!("the tasks fit on separate schedulers");
    };

    assert_eq!(solution.get_integer_value(workload.execution[0]), 0);
    assert_eq!(solution.get_integer_value(workload.execution[1]), 1);
}

#[test]
fn largest_response_values_are_the_computed_bounds() {
    let mut solver = Solver::default();
    let workload = set_up_mapping(&mut solver, &[(1, 10, 4), (2, 5, 2)], &[0]);

    let mut responses =
        IndependentVariableValueBrancher::new(InputOrder::new(&workload.response), InDomainMax);
    let SatisfactionResult::Satisfiable(solution) =
        solver.satisfy(&mut responses, &mut Indefinite)
    else {
        panic!("the tasks are schedulable together");
    };

    assert_eq!(solution.get_integer_value(workload.response[0]), 8);
    assert_eq!(solution.get_integer_value(workload.response[1]), 2);
}

#[test]
fn too_many_heavy_tasks_cannot_be_mapped() {
    let mut solver = Solver::default();
    // Any two of these on one scheduler exceed a utilisation of one.
    let workload = set_up_mapping(&mut solver, &[(1, 5, 3), (2, 5, 3), (3, 5, 3)], &[0, 1]);

    let mut mapping =
        IndependentVariableValueBrancher::new(InputOrder::new(&workload.execution), InDomainMin);

    assert_eq!(
        solver.satisfy(&mut mapping, &mut Indefinite),
        SatisfactionResult::Unsatisfiable
    );
}

#[test]
fn decision_budget_stops_the_search() {
    let mut solver = Solver::default();
    let workload = set_up_mapping(&mut solver, &[(1, 5, 3), (2, 5, 3), (3, 5, 3)], &[0, 1]);

    let mut mapping =
        IndependentVariableValueBrancher::new(InputOrder::new(&workload.execution), InDomainMin);

    assert_eq!(
        solver.satisfy(&mut mapping, &mut DecisionBudget::new(1)),
        SatisfactionResult::Unknown
    );
    // The domains are restored, so the search can continue with a larger budget.
    assert_eq!(solver.upper_bound(&workload.execution[0]), 1);
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .expect("no test panics while holding the lock")
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn statistics_are_logged_per_propagator() {
    let buffer = SharedBuffer::default();
    configure_statistic_logging("%%", Some("==="), None, Some(Box::new(buffer.clone())));

    let mut solver = Solver::with_options(SolverOptions {
        log_propagator_statistics: true,
    });
    let workload = set_up_mapping(&mut solver, &[(1, 10, 4), (2, 5, 2)], &[0]);
    assert_eq!(solver.upper_bound(&workload.response[0]), 8);

    solver.log_statistics();

    let output = String::from_utf8(buffer.0.lock().expect("not poisoned").clone())
        .expect("statistics are written as text");
    assert!(output.contains("%% FixedPrioritySchedulability_number_0_num_tightenings=2"));
    assert!(output.contains("%% solver_num_decisions=0"));
    assert!(output.ends_with("===\n"));
}
