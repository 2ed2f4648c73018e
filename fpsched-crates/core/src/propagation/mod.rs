//! The contract between the engine and the propagators it runs.
//!
//! A [`Propagator`] is created by a [`PropagatorConstructor`], which registers the propagator
//! for [`DomainEvents`](crate::engine::notifications::DomainEvents) on the variables it reads.
//! Whenever such an event happens [`Propagator::notify`] decides whether the propagator is
//! enqueued, after which [`Propagator::propagate`] narrows domains through the
//! [`PropagationContext`] or reports an inconsistency. On backtracking every propagator is
//! given the chance to [`Propagator::synchronise`].
mod constructor;
mod contexts;
mod domains;
mod local_id;
mod propagator;
mod propagator_id;
pub(crate) mod store;

pub use constructor::*;
pub use contexts::*;
pub use domains::Domains;
pub(crate) use domains::HasAssignments;
pub use domains::ReadDomains;
pub use local_id::LocalId;
pub use propagator::*;
pub use propagator_id::*;

pub use crate::basic_types::Inconsistency;
pub use crate::basic_types::PropagationStatusCP;
pub use crate::basic_types::PropagatorConflict;
pub use crate::engine::notifications::DomainEvent;
pub use crate::engine::notifications::DomainEvents;
