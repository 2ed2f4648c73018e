use log::debug;
use log::trace;
use log::warn;

use super::interference::InterferenceModel;
use super::options::FixedPriorityOptions;
use super::options::ResponseTightening;
use super::response_time::response_time_bound;
use super::response_time::Interferer;
use super::response_time::ResponseTime;
use crate::basic_types::ConflictCause;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::PropagatorConflict;
use crate::basic_types::PropositionalConjunction;
use crate::create_statistics_struct;
use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::DomainEvents;
use crate::predicate;
use crate::predicates::Predicate;
use crate::propagation::Domains;
use crate::propagation::EnqueueDecision;
use crate::propagation::Entailment;
use crate::propagation::LocalId;
use crate::propagation::NotificationContext;
use crate::propagation::Priority;
use crate::propagation::PropagationContext;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
use crate::variables::IntegerVariable;

/// The arguments of [`FixedPrioritySchedulabilityPropagator`]; every array is indexed by task.
///
/// Validated arguments are created by
/// [`fixed_priority_schedulability`](crate::constraints::fixed_priority_schedulability).
#[derive(Clone, Debug)]
pub struct FixedPrioritySchedulabilityArgs<Var> {
    pub(crate) scheduler: i32,
    pub(crate) priorities: Box<[i32]>,
    pub(crate) periods: Box<[i64]>,
    pub(crate) execution: Box<[Var]>,
    pub(crate) blocking: Box<[Var]>,
    pub(crate) duration: Box<[Var]>,
    pub(crate) response: Box<[Var]>,
    pub(crate) options: FixedPriorityOptions,
}

create_statistics_struct!(FixedPriorityStatistics {
    num_propagate_calls: usize,
    /// Summed over every busy-window iteration that was started.
    num_fixed_point_iterations: u64,
    num_tightenings: usize,
    num_unschedulable: usize,
    num_below_lower_bound: usize,
});

/// The four variables a task contributes; used to encode the [`LocalId`]s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TaskVariable {
    Execution = 0,
    Blocking = 1,
    Duration = 2,
    Response = 3,
}

impl TaskVariable {
    fn local_id(self, task: usize, num_tasks: usize) -> LocalId {
        LocalId::from((self as usize * num_tasks + task) as u32)
    }

    fn decode(local_id: LocalId, num_tasks: usize) -> (TaskVariable, usize) {
        let index = local_id.unpack() as usize;
        let kind = match index / num_tasks {
            0 => TaskVariable::Execution,
            1 => TaskVariable::Blocking,
            2 => TaskVariable::Duration,
            _ => TaskVariable::Response,
        };

        (kind, index % num_tasks)
    }
}

impl<Var: IntegerVariable + 'static> PropagatorConstructor for FixedPrioritySchedulabilityArgs<Var> {
    type PropagatorImpl = FixedPrioritySchedulabilityPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let FixedPrioritySchedulabilityArgs {
            scheduler,
            priorities,
            periods,
            execution,
            blocking,
            duration,
            response,
            options,
        } = self;

        let num_tasks = execution.len();

        // The certain interference reads the lower bounds as well.
        let demand_events = match options.tightening {
            ResponseTightening::WhenAssigned => DomainEvents::BOUNDS,
            ResponseTightening::WhenCandidate => DomainEvents::UPPER_BOUND,
        };

        for task in 0..num_tasks {
            context.register(
                execution[task].clone(),
                DomainEvents::REMOVAL_OR_ASSIGN,
                TaskVariable::Execution.local_id(task, num_tasks),
            );
            context.register(
                blocking[task].clone(),
                demand_events,
                TaskVariable::Blocking.local_id(task, num_tasks),
            );
            context.register(
                duration[task].clone(),
                demand_events,
                TaskVariable::Duration.local_id(task, num_tasks),
            );
            context.register(
                response[task].clone(),
                DomainEvents::UPPER_BOUND,
                TaskVariable::Response.local_id(task, num_tasks),
            );
        }

        let domains = context.domains();
        let is_candidate: Box<[bool]> = execution
            .iter()
            .map(|var| domains.contains(var, scheduler))
            .collect();

        if !is_candidate.iter().any(|&candidate| candidate) {
            warn!("No task can be mapped to scheduler {scheduler}");
        }

        FixedPrioritySchedulabilityPropagator {
            scheduler,
            interference: InterferenceModel::new(&priorities, options.ordering, options.ties),
            periods,
            execution,
            blocking,
            duration,
            response,
            options,
            is_candidate,
            is_dirty: vec![true; num_tasks].into_boxed_slice(),
            dirty_tasks: (0..num_tasks).collect(),
            statistics: FixedPriorityStatistics::default(),
        }
    }
}

/// Bounds the response times of the tasks mapped to one fixed-priority preemptive scheduler.
///
/// For a task `i` on the scheduler the worst-case response time is the least fixed point of
/// `rt = blocking[i] + duration[i] + sum_j duration[j] * (floor(rt / period[j]) + 1)`, where `j`
/// ranges over the tasks which can be mapped to the same scheduler and preempt `i` (see
/// [`InterferenceModel`]). Taking the upper bounds of the blocking and duration variables, and
/// every task which can still end up on the scheduler, gives a response time which holds in
/// every completion of the domains; it becomes the upper bound of `response[i]`.
///
/// A task for which the iteration exceeds the upper bound of `response[i]` is unschedulable. When
/// that is raised, and which tasks are tightened, is decided by [`ResponseTightening`].
///
/// The propagator is incremental: a change to a variable only causes the response times of the
/// affected tasks to be recomputed.
#[derive(Clone, Debug)]
pub struct FixedPrioritySchedulabilityPropagator<Var> {
    scheduler: i32,
    interference: InterferenceModel,
    periods: Box<[i64]>,
    execution: Box<[Var]>,
    blocking: Box<[Var]>,
    duration: Box<[Var]>,
    response: Box<[Var]>,
    options: FixedPriorityOptions,

    /// Whether the scheduler is still in the execution domain of each task.
    is_candidate: Box<[bool]>,
    /// Tasks whose response time has to be recomputed in the next call to propagate.
    is_dirty: Box<[bool]>,
    dirty_tasks: Vec<usize>,

    statistics: FixedPriorityStatistics,
}

impl<Var: IntegerVariable + 'static> FixedPrioritySchedulabilityPropagator<Var> {
    pub fn scheduler(&self) -> i32 {
        self.scheduler
    }

    pub fn num_tasks(&self) -> usize {
        self.execution.len()
    }

    pub fn interference(&self) -> &InterferenceModel {
        &self.interference
    }

    /// Runs the pessimistic analysis of `task` against the current domains, bounded by the upper
    /// bound of its response time. Returns `None` if the task cannot be mapped to the scheduler.
    pub fn analyse(&self, domains: Domains<'_>, task: usize) -> Option<ResponseTime> {
        if !domains.contains(&self.execution[task], self.scheduler) {
            return None;
        }

        let ceiling = i64::from(domains.upper_bound(&self.response[task]));
        Some(self.possible_response_time(domains, task, ceiling))
    }

    fn mark_dirty(&mut self, task: usize) {
        if !self.is_dirty[task] {
            self.is_dirty[task] = true;
            self.dirty_tasks.push(task);
        }
    }

    /// Marks `task` and every task it may preempt.
    fn mark_dirty_with_interfered(&mut self, task: usize) {
        self.mark_dirty(task);

        for index in 0..self.interference.interfered_by(task).len() {
            let interfered = self.interference.interfered_by(task)[index];
            self.mark_dirty(interfered);
        }
    }

    /// The response time with every task which can still be mapped to the scheduler interfering,
    /// and all demands at their upper bound.
    fn possible_response_time(&self, domains: Domains<'_>, task: usize, ceiling: i64) -> ResponseTime {
        let interferers: Vec<Interferer> = self
            .interference
            .interferers_of(task)
            .iter()
            .filter(|&&other| domains.contains(&self.execution[other], self.scheduler))
            .map(|&other| Interferer {
                duration: i64::from(domains.upper_bound(&self.duration[other])),
                period: self.periods[other],
            })
            .collect();

        response_time_bound(
            i64::from(domains.upper_bound(&self.blocking[task])),
            i64::from(domains.upper_bound(&self.duration[task])),
            &interferers,
            ceiling,
        )
    }

    /// The response time with only the tasks fixed to the scheduler interfering, and all demands
    /// at their lower bound.
    fn certain_response_time(&self, domains: Domains<'_>, task: usize, ceiling: i64) -> ResponseTime {
        let interferers: Vec<Interferer> = self
            .interference
            .interferers_of(task)
            .iter()
            .filter(|&&other| domains.fixed_value(&self.execution[other]) == Some(self.scheduler))
            .map(|&other| Interferer {
                duration: i64::from(domains.lower_bound(&self.duration[other])),
                period: self.periods[other],
            })
            .collect();

        response_time_bound(
            i64::from(domains.lower_bound(&self.blocking[task])),
            i64::from(domains.lower_bound(&self.duration[task])),
            &interferers,
            ceiling,
        )
    }

    /// The bounds which the possible response time of `task` is computed from.
    fn possible_explanation(
        &self,
        domains: Domains<'_>,
        task: usize,
        is_assigned: bool,
    ) -> PropositionalConjunction {
        let scheduler = self.scheduler;
        let mut explanation = PropositionalConjunction::default();

        if is_assigned {
            explanation.push(predicate!(self.execution[task] == scheduler));
        }

        let blocking = domains.upper_bound(&self.blocking[task]);
        explanation.push(predicate!(self.blocking[task] <= blocking));
        let duration = domains.upper_bound(&self.duration[task]);
        explanation.push(predicate!(self.duration[task] <= duration));

        for &other in self.interference.interferers_of(task) {
            if domains.contains(&self.execution[other], scheduler) {
                let duration = domains.upper_bound(&self.duration[other]);
                explanation.push(predicate!(self.duration[other] <= duration));
            } else {
                explanation.push(predicate!(self.execution[other] != scheduler));
            }
        }

        explanation
    }

    /// The bounds which the certain response time of `task` is computed from.
    fn certain_explanation(&self, domains: Domains<'_>, task: usize) -> PropositionalConjunction {
        let scheduler = self.scheduler;
        let mut explanation = PropositionalConjunction::default();

        explanation.push(predicate!(self.execution[task] == scheduler));
        let blocking = domains.lower_bound(&self.blocking[task]);
        explanation.push(predicate!(self.blocking[task] >= blocking));
        let duration = domains.lower_bound(&self.duration[task]);
        explanation.push(predicate!(self.duration[task] >= duration));

        for &other in self.interference.interferers_of(task) {
            if domains.fixed_value(&self.execution[other]) == Some(scheduler) {
                explanation.push(predicate!(self.execution[other] == scheduler));
                let duration = domains.lower_bound(&self.duration[other]);
                explanation.push(predicate!(self.duration[other] >= duration));
            }
        }

        explanation
    }

    fn unschedulable(
        &self,
        mut explanation: PropositionalConjunction,
        response_bound: Predicate,
        task: usize,
        computed: i64,
        ceiling: i64,
    ) -> PropagatorConflict {
        debug!(
            "Task {task} is unschedulable on scheduler {}: response time reaches {computed} > {ceiling}",
            self.scheduler
        );

        explanation.push(response_bound);
        PropagatorConflict::new(explanation).with_cause(ConflictCause::Unschedulable {
            task,
            scheduler: self.scheduler,
            computed,
            ceiling,
        })
    }

    fn propagate_task(
        &self,
        context: &mut PropagationContext<'_>,
        task: usize,
        statistics: &mut FixedPriorityStatistics,
    ) -> PropagationStatusCP {
        let scheduler = self.scheduler;

        if !context.contains(&self.execution[task], scheduler) {
            return Ok(());
        }

        let is_assigned = context.is_fixed(&self.execution[task]);
        if !is_assigned && self.options.tightening == ResponseTightening::WhenAssigned {
            return Ok(());
        }

        let ceiling_i32 = context.upper_bound(&self.response[task]);
        let ceiling = i64::from(ceiling_i32);
        let possible = self.possible_response_time(context.domains(), task, ceiling);
        statistics.num_fixed_point_iterations += u64::from(possible.iterations());

        match possible {
            ResponseTime::Converged { value, .. } => {
                let lower_bound = context.lower_bound(&self.response[task]);

                if value < i64::from(lower_bound) {
                    statistics.num_below_lower_bound += 1;
                    debug!(
                        "Task {task} on scheduler {scheduler} converges to {value}, below its lower bound {lower_bound}"
                    );

                    let mut explanation =
                        self.possible_explanation(context.domains(), task, is_assigned);
                    explanation.push(predicate!(self.response[task] >= lower_bound));

                    return Err(PropagatorConflict::new(explanation)
                        .with_cause(ConflictCause::ResponseBelowLowerBound {
                            task,
                            scheduler,
                            computed: value,
                            lower_bound: i64::from(lower_bound),
                        })
                        .into());
                }

                if value < ceiling {
                    // Below an i32 upper bound, and at least the non-negative lower bound.
                    let bound = value as i32;
                    debug!(
                        "Tightening the response time of task {task} on scheduler {scheduler} from {ceiling} to {bound}"
                    );

                    context.post(predicate!(self.response[task] <= bound))?;
                    statistics.num_tightenings += 1;
                }

                Ok(())
            }

            ResponseTime::Unschedulable { exceeded_at, .. } => match self.options.tightening {
                ResponseTightening::WhenCandidate => {
                    statistics.num_unschedulable += 1;

                    let explanation = self.possible_explanation(context.domains(), task, is_assigned);
                    Err(self
                        .unschedulable(
                            explanation,
                            predicate!(self.response[task] <= ceiling_i32),
                            task,
                            exceeded_at,
                            ceiling,
                        )
                        .into())
                }

                ResponseTightening::WhenAssigned => {
                    let certain = self.certain_response_time(context.domains(), task, ceiling);
                    statistics.num_fixed_point_iterations += u64::from(certain.iterations());

                    match certain {
                        ResponseTime::Unschedulable { exceeded_at, .. } => {
                            statistics.num_unschedulable += 1;

                            let explanation = self.certain_explanation(context.domains(), task);
                            Err(self
                                .unschedulable(
                                    explanation,
                                    predicate!(self.response[task] <= ceiling_i32),
                                    task,
                                    exceeded_at,
                                    ceiling,
                                )
                                .into())
                        }
                        ResponseTime::Converged { value, .. } => {
                            trace!(
                                "Task {task} on scheduler {scheduler}: certain response time {value}, possible response time above {ceiling}"
                            );
                            Ok(())
                        }
                    }
                }
            },
        }
    }
}

impl<Var: IntegerVariable + 'static> Propagator for FixedPrioritySchedulabilityPropagator<Var> {
    fn name(&self) -> &str {
        "FixedPrioritySchedulability"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn notify(
        &mut self,
        context: NotificationContext,
        local_id: LocalId,
        event: DomainEvent,
    ) -> EnqueueDecision {
        let (kind, task) = TaskVariable::decode(local_id, self.num_tasks());

        match kind {
            TaskVariable::Execution => {
                let is_candidate = context.contains(&self.execution[task], self.scheduler);
                let was_candidate = std::mem::replace(&mut self.is_candidate[task], is_candidate);

                // Only the scheduler leaving the domain, or the task becoming fixed to it,
                // changes the interference.
                if is_candidate == was_candidate
                    && !(is_candidate && event == DomainEvent::Assign)
                {
                    return EnqueueDecision::Skip;
                }

                self.mark_dirty_with_interfered(task);
            }
            TaskVariable::Duration => {
                if !self.is_candidate[task] {
                    return EnqueueDecision::Skip;
                }

                self.mark_dirty_with_interfered(task);
            }
            TaskVariable::Blocking | TaskVariable::Response => {
                if !self.is_candidate[task] {
                    return EnqueueDecision::Skip;
                }

                self.mark_dirty(task);
            }
        }

        EnqueueDecision::Enqueue
    }

    fn synchronise(&mut self, context: NotificationContext) {
        for (task, var) in self.execution.iter().enumerate() {
            self.is_candidate[task] = context.contains(var, self.scheduler);
        }

        for task in self.dirty_tasks.drain(..) {
            self.is_dirty[task] = false;
        }
    }

    fn propagate(&mut self, mut context: PropagationContext) -> PropagationStatusCP {
        self.statistics.num_propagate_calls += 1;

        let mut tasks = std::mem::take(&mut self.dirty_tasks);
        tasks.sort_unstable();
        for &task in tasks.iter() {
            self.is_dirty[task] = false;
        }

        let mut statistics = self.statistics;
        let result = tasks
            .iter()
            .try_for_each(|&task| self.propagate_task(&mut context, task, &mut statistics));
        self.statistics = statistics;

        tasks.clear();
        self.dirty_tasks = tasks;

        result
    }

    fn propagate_from_scratch(&self, mut context: PropagationContext) -> PropagationStatusCP {
        let mut statistics = FixedPriorityStatistics::default();

        (0..self.num_tasks())
            .try_for_each(|task| self.propagate_task(&mut context, task, &mut statistics))
    }

    fn entailment(&self, domains: Domains) -> Entailment {
        let all_responses_fixed = self
            .execution
            .iter()
            .zip(self.response.iter())
            .filter(|(execution, _)| domains.contains(*execution, self.scheduler))
            .all(|(_, response)| domains.is_fixed(response));

        if all_responses_fixed {
            Entailment::Satisfied
        } else {
            Entailment::Undetermined
        }
    }

    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.statistics.log(statistic_logger);
    }
}
