use super::Domains;
use super::HasAssignments;
use super::PropagatorId;
use crate::engine::Assignments;
use crate::engine::EmptyDomain;
use crate::predicates::Predicate;

/// Passed to [`Propagator::notify`](super::Propagator::notify) and
/// [`Propagator::synchronise`](super::Propagator::synchronise); gives read access to the domains.
#[derive(Debug)]
pub struct NotificationContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> NotificationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        NotificationContext { assignments }
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self.assignments)
    }
}

impl HasAssignments for NotificationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// The only point of communication between a propagator and the bound store during propagation.
/// Domains can be read and narrowed; nothing else can be changed.
#[derive(Debug)]
pub struct PropagationContext<'a> {
    assignments: &'a mut Assignments,
    propagator_id: PropagatorId,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a mut Assignments, propagator_id: PropagatorId) -> Self {
        PropagationContext {
            assignments,
            propagator_id,
        }
    }

    /// The propagator that is currently running.
    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self.assignments)
    }

    /// Narrows a domain such that `predicate` holds. Returns [`EmptyDomain`] if that is
    /// impossible, in which case the propagator should stop and report it.
    pub fn post(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        let _ = self.assignments.post_predicate(predicate)?;
        Ok(())
    }
}

impl HasAssignments for PropagationContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
