use std::fmt::Debug;

use enumset::EnumSet;

use crate::engine::notifications::DomainEvent;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;
use crate::predicates::PredicateConstructor;

/// A trait specifying the required behaviour of an integer variable such as retrieving a
/// lower-bound ([`IntegerVariable::lower_bound`]).
pub trait IntegerVariable:
    Clone + PredicateConstructor<Value = i32> + Debug + 'static
{
    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);
}
