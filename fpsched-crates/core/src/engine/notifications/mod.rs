//! Bookkeeping of which propagator is interested in which change to which domain.
mod domain_events;
mod watch_list;

pub use domain_events::DomainEvent;
pub use domain_events::DomainEvents;
pub(crate) use watch_list::WatchListDomainEvents;
pub(crate) use watch_list::Watchers;
