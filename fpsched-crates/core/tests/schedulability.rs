//! Response-time bounds of the schedulability constraint, driven through the public [`State`]
//! API so that bounds can be narrowed and restored step by step.
use fpsched_core::constraints::fixed_priority_schedulability;
use fpsched_core::constraints::FixedPriorityTask;
use fpsched_core::constraints::FixedPriorityWorkload;
use fpsched_core::options::FixedPriorityOptions;
use fpsched_core::options::PriorityOrdering;
use fpsched_core::predicate;
use fpsched_core::propagation::Entailment;
use fpsched_core::propagators::ResponseTime;
use fpsched_core::state::Conflict;
use fpsched_core::state::PropagatorId;
use fpsched_core::state::State;
use fpsched_core::variables::DomainId;
use fpsched_core::ConflictCause;

const SCHEDULER: i32 = 0;

/// `(priority, period, execution, duration bounds, response upper bound)` per task; blocking is
/// zero.
type TaskInfo = (i32, i64, Vec<i32>, (i32, i32), i32);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn set_up_scheduler(
    tasks: &[TaskInfo],
    options: FixedPriorityOptions,
) -> (State, FixedPriorityWorkload<DomainId>, PropagatorId, Result<(), Conflict>) {
    init_logging();

    let mut state = State::default();
    let mut workload = FixedPriorityWorkload::default();

    for (priority, period, execution, (min_duration, max_duration), max_response) in tasks {
        let _ = workload.push_task(FixedPriorityTask {
            priority: *priority,
            period: *period,
            execution: state.new_sparse_variable(execution.clone()),
            blocking: state.new_interval_variable(0, 0),
            duration: state.new_interval_variable(*min_duration, *max_duration),
            response: state.new_interval_variable(0, *max_response),
        });
    }

    let constraint = fixed_priority_schedulability(SCHEDULER, &workload, options)
        .expect("the workload is well-formed");
    constraint
        .check_bounds(state.get_domains())
        .expect("no negative durations");

    let handle = state.add_propagator(constraint.into_args());
    let result = state.propagate_to_fixed_point();

    (state, workload, handle.propagator_id(), result)
}

fn response_upper_bounds(state: &State, workload: &FixedPriorityWorkload<DomainId>) -> Vec<i32> {
    workload
        .response
        .iter()
        .map(|&response| state.upper_bound(response))
        .collect()
}

#[test]
fn two_tasks_with_the_higher_priority_on_the_shorter_period() {
    let (state, workload, _, result) = set_up_scheduler(
        &[
            (1, 10, vec![0], (4, 4), 10),
            (2, 5, vec![0], (2, 2), 10),
        ],
        Default::default(),
    );

    assert!(result.is_ok(), "Expected no conflict but was {result:?}");
    // 4 -> 6 -> 8 -> 8 for the first task.
    assert_eq!(response_upper_bounds(&state, &workload), vec![8, 2]);
}

#[test]
fn rate_monotonic_textbook_task_set() {
    let (state, workload, _, result) = set_up_scheduler(
        &[
            (7, 7, vec![0], (3, 3), 7),
            (12, 12, vec![0], (3, 3), 12),
            (20, 20, vec![0], (5, 5), 20),
        ],
        FixedPriorityOptions {
            ordering: PriorityOrdering::LowerValueFirst,
            ..Default::default()
        },
    );

    assert!(result.is_ok(), "Expected no conflict but was {result:?}");
    assert_eq!(response_upper_bounds(&state, &workload), vec![3, 6, 20]);
}

#[test]
fn single_task_converges_in_one_iteration() {
    init_logging();

    let mut state = State::default();
    let workload = FixedPriorityWorkload::default().with_task(FixedPriorityTask {
        priority: 1,
        period: 50,
        execution: state.new_sparse_variable(vec![0]),
        blocking: state.new_interval_variable(2, 2),
        duration: state.new_interval_variable(3, 3),
        response: state.new_interval_variable(0, 50),
    });

    let args = fixed_priority_schedulability(SCHEDULER, &workload, Default::default())
        .expect("the workload is well-formed")
        .into_args();
    let handle = state.add_propagator(args);
    state.propagate_to_fixed_point().expect("no conflict");

    assert_eq!(state.upper_bound(workload.response[0]), 5);

    let propagator = state.get_propagator(handle).expect("the handle is valid");
    assert_eq!(
        propagator.analyse(state.get_domains(), 0),
        Some(ResponseTime::Converged {
            value: 5,
            iterations: 1
        })
    );
}

#[test]
fn response_bounds_never_grow_while_domains_narrow() {
    let (mut state, workload, _, result) = set_up_scheduler(
        &[
            (1, 20, vec![0], (4, 4), 20),
            (2, 5, vec![0, 1], (1, 3), 20),
        ],
        Default::default(),
    );
    assert!(result.is_ok(), "Expected no conflict but was {result:?}");

    let mut upper_bounds = vec![state.upper_bound(workload.response[0])];

    let duration = workload.duration[1];
    let _ = state
        .post(predicate!(duration <= 2))
        .expect("2 is in the domain");
    state.propagate_to_fixed_point().expect("no conflict");
    upper_bounds.push(state.upper_bound(workload.response[0]));

    let execution = workload.execution[1];
    let _ = state
        .post(predicate!(execution != SCHEDULER))
        .expect("1 remains in the domain");
    state.propagate_to_fixed_point().expect("no conflict");
    upper_bounds.push(state.upper_bound(workload.response[0]));

    // 4 -> 7 -> 10 -> 13 -> 13, then 4 -> 6 -> 8 -> 8, then no interference at all.
    assert_eq!(upper_bounds, vec![13, 8, 4]);
}

#[test]
fn propagating_again_changes_nothing() {
    let (mut state, workload, propagator, result) = set_up_scheduler(
        &[
            (1, 10, vec![0], (4, 4), 10),
            (2, 5, vec![0], (2, 2), 10),
            (3, 40, vec![0, 1], (1, 2), 40),
        ],
        Default::default(),
    );
    assert!(result.is_ok(), "Expected no conflict but was {result:?}");
    assert_eq!(response_upper_bounds(&state, &workload), vec![10, 4, 40]);

    // Raising a duration lower bound leaves every upper bound as it was, but every task the
    // third one preempts is analysed again.
    let duration = workload.duration[2];
    assert_eq!(state.post(predicate!(duration >= 2)), Ok(true));
    state.propagate_to_fixed_point().expect("no conflict");

    assert_eq!(response_upper_bounds(&state, &workload), vec![10, 4, 40]);
    assert_eq!(state.entailment(propagator), Entailment::Undetermined);
}

#[test]
fn utilisation_above_one_is_unschedulable() {
    let (_, _, _, result) = set_up_scheduler(
        &[(1, 5, vec![0], (4, 4), 5), (2, 5, vec![0], (2, 2), 5)],
        Default::default(),
    );

    let Err(Conflict::Propagator(conflict)) = result else {
        panic!("Expected a propagator conflict but was {result:?}");
    };
    assert!(
        matches!(
            conflict.cause,
            Some(ConflictCause::Unschedulable {
                task: 0,
                scheduler: SCHEDULER,
                ceiling: 5,
                ..
            })
        ),
        "Unexpected cause {:?}",
        conflict.cause
    );
}

#[test]
fn losing_the_scheduler_stops_the_interference() {
    let (mut state, workload, _, result) = set_up_scheduler(
        &[
            (1, 10, vec![0], (4, 4), 10),
            (2, 5, vec![0, 1], (2, 2), 10),
        ],
        Default::default(),
    );
    assert!(result.is_ok(), "Expected no conflict but was {result:?}");
    assert_eq!(state.upper_bound(workload.response[0]), 8);

    let execution = workload.execution[1];
    let _ = state
        .post(predicate!(execution == 1))
        .expect("1 is in the domain");
    state.propagate_to_fixed_point().expect("no conflict");

    assert_eq!(state.upper_bound(workload.response[0]), 4);
}

#[test]
fn restoring_a_checkpoint_undoes_the_tightening() {
    let (mut state, workload, _, result) = set_up_scheduler(
        &[
            (1, 10, vec![0], (4, 4), 10),
            (2, 5, vec![0, 1], (2, 2), 10),
        ],
        Default::default(),
    );
    assert!(result.is_ok(), "Expected no conflict but was {result:?}");

    let checkpoint = state.get_checkpoint();
    state.new_checkpoint();

    let execution = workload.execution[1];
    let _ = state
        .post(predicate!(execution == 1))
        .expect("1 is in the domain");
    state.propagate_to_fixed_point().expect("no conflict");
    assert_eq!(state.upper_bound(workload.response[0]), 4);

    state.restore_to(checkpoint);
    assert_eq!(state.upper_bound(workload.response[0]), 8);

    // The sibling branch sees the interference again.
    state.new_checkpoint();
    let _ = state
        .post(predicate!(execution == SCHEDULER))
        .expect("0 is in the domain");
    state.propagate_to_fixed_point().expect("no conflict");
    assert_eq!(response_upper_bounds(&state, &workload), vec![8, 2]);
}

#[test]
fn satisfied_once_every_mapped_response_is_fixed() {
    let (mut state, workload, propagator, result) = set_up_scheduler(
        &[
            (1, 10, vec![0], (4, 4), 10),
            (2, 5, vec![1], (2, 2), 10),
        ],
        Default::default(),
    );
    assert!(result.is_ok(), "Expected no conflict but was {result:?}");
    assert_eq!(state.entailment(propagator), Entailment::Undetermined);

    let response = workload.response[0];
    let _ = state
        .post(predicate!(response >= 4))
        .expect("4 is in the domain");
    state.propagate_to_fixed_point().expect("no conflict");

    assert_eq!(state.entailment(propagator), Entailment::Satisfied);
}
