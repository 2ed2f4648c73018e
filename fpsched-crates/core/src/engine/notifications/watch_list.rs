use enumset::EnumSet;

use super::DomainEvent;
use crate::containers::KeyedVec;
use crate::engine::variables::DomainId;
use crate::propagation::PropagatorVarId;

/// For every domain, the propagators (and their local ids) that want to hear about it.
#[derive(Default, Debug, Clone)]
pub(crate) struct WatchListDomainEvents {
    watchers: KeyedVec<DomainId, Vec<Watcher>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Watcher {
    pub(crate) propagator_var: PropagatorVarId,
    pub(crate) events: EnumSet<DomainEvent>,
}

impl WatchListDomainEvents {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(Vec::new());
    }

    /// Subscribes `propagator_var` to `events` on `domain`. Registering the same pair twice
    /// merges the event sets.
    pub(crate) fn watch_all(
        &mut self,
        domain: DomainId,
        events: EnumSet<DomainEvent>,
        propagator_var: PropagatorVarId,
    ) {
        self.watchers.accomodate(domain, Vec::new());

        let watchers = &mut self.watchers[domain];
        if let Some(existing) = watchers
            .iter_mut()
            .find(|watcher| watcher.propagator_var == propagator_var)
        {
            existing.events |= events;
        } else {
            watchers.push(Watcher {
                propagator_var,
                events,
            });
        }
    }

    pub(crate) fn get_affected_propagators(
        &self,
        domain: DomainId,
    ) -> impl Iterator<Item = &Watcher> + '_ {
        self.watchers
            .get(domain)
            .into_iter()
            .flat_map(|watchers| watchers.iter())
    }
}

/// Handed to [`IntegerVariable::watch_all`](crate::variables::IntegerVariable::watch_all) so
/// that a variable can register the propagator that is being constructed.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchListDomainEvents,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(
        propagator_var: PropagatorVarId,
        watch_list: &'a mut WatchListDomainEvents,
    ) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub fn watch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        self.watch_list
            .watch_all(domain, events, self.propagator_var);
    }
}
