use super::Domains;
use super::HasAssignments;
use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use super::PropagatorVarId;
use crate::engine::notifications::DomainEvents;
use crate::engine::notifications::WatchListDomainEvents;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;
use crate::variables::IntegerVariable;

/// Creates a fully initialised instance of a [`Propagator`].
///
/// The constructor decides on which events the propagator is enqueued, and can initialise the
/// propagator from the current domains.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator + Clone;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// Used by a [`PropagatorConstructor`] to subscribe to domain changes and to read the domains
/// at the moment the propagator is added.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    watch_list: &'a mut WatchListDomainEvents,
    assignments: &'a Assignments,
    propagator_id: PropagatorId,
}

impl<'a> PropagatorConstructorContext<'a> {
    pub(crate) fn new(
        watch_list: &'a mut WatchListDomainEvents,
        assignments: &'a Assignments,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagatorConstructorContext {
            watch_list,
            assignments,
            propagator_id,
        }
    }

    pub fn propagator_id(&self) -> PropagatorId {
        self.propagator_id
    }

    pub fn domains(&self) -> Domains<'_> {
        Domains::new(self.assignments)
    }

    /// Subscribes the propagator to `domain_events` on `var`.
    ///
    /// The [`LocalId`] is handed back in [`Propagator::notify`] to identify the variable, so every
    /// registered variable needs its own.
    pub fn register(
        &mut self,
        var: impl IntegerVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        let mut watchers = Watchers::new(propagator_var, self.watch_list);
        var.watch_all(&mut watchers, domain_events.events());
    }
}

impl HasAssignments for PropagatorConstructorContext<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}
