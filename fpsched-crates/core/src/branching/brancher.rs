use super::SelectionContext;
use crate::predicates::Predicate;
use crate::results::Solution;
#[cfg(doc)]
use crate::Solver;

/// Produces the decisions of the depth-first search in [`Solver::satisfy`].
pub trait Brancher {
    /// Returns the next decision, or `None` once every variable of interest is fixed.
    ///
    /// The returned predicate must not already hold in the current domains.
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate>;

    /// Called after a decision led to a conflict.
    fn on_conflict(&mut self) {}

    /// Called when a solution is found.
    fn on_solution(&mut self, _solution: &Solution) {}
}
