use super::options::PriorityOrdering;
use super::options::TiePolicy;

/// Which tasks can preempt which, decided from the static priorities alone.
///
/// Whether an interference actually happens further depends on both tasks being mapped to the
/// same scheduler; see [`InterferenceModel::interferes`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterferenceModel {
    /// `interferers[i]` are the tasks which preempt task `i` when they share its scheduler.
    interferers: Box<[Box<[usize]>]>,
    /// `interfered[j]` are the tasks which task `j` preempts when they share its scheduler.
    interfered: Box<[Box<[usize]>]>,
}

impl InterferenceModel {
    pub fn new(priorities: &[i32], ordering: PriorityOrdering, ties: TiePolicy) -> Self {
        let num_tasks = priorities.len();

        let interferers: Box<[Box<[usize]>]> = (0..num_tasks)
            .map(|task| {
                (0..num_tasks)
                    .filter(|&other| {
                        other != task
                            && preempts(priorities[other], priorities[task], ordering, ties)
                    })
                    .collect()
            })
            .collect();

        let mut interfered = vec![Vec::new(); num_tasks];
        for (task, task_interferers) in interferers.iter().enumerate() {
            for &other in task_interferers.iter() {
                interfered[other].push(task);
            }
        }

        InterferenceModel {
            interferers,
            interfered: interfered.into_iter().map(Vec::into_boxed_slice).collect(),
        }
    }

    pub fn num_tasks(&self) -> usize {
        self.interferers.len()
    }

    /// The tasks whose jobs can delay `task` when mapped to the same scheduler.
    pub fn interferers_of(&self, task: usize) -> &[usize] {
        &self.interferers[task]
    }

    /// The tasks which `task` can delay when mapped to the same scheduler.
    pub fn interfered_by(&self, task: usize) -> &[usize] {
        &self.interfered[task]
    }

    /// Whether `other` interferes with `task`, given which tasks can still be mapped to the
    /// scheduler under consideration.
    pub fn interferes(
        &self,
        task: usize,
        other: usize,
        is_candidate: impl Fn(usize) -> bool,
    ) -> bool {
        task != other
            && is_candidate(task)
            && is_candidate(other)
            && self.interferers[task].contains(&other)
    }
}

/// Whether a task with priority `candidate` preempts a task with priority `victim`.
fn preempts(candidate: i32, victim: i32, ordering: PriorityOrdering, ties: TiePolicy) -> bool {
    if candidate == victim {
        return ties == TiePolicy::Interfere;
    }

    match ordering {
        PriorityOrdering::HigherValueFirst => candidate > victim,
        PriorityOrdering::LowerValueFirst => candidate < victim,
    }
}
