use crate::branching::SelectionContext;
use crate::predicates::Predicate;
use crate::results::Solution;

/// Decides on a value for the variable chosen by the
/// [`VariableSelector`](crate::branching::VariableSelector).
pub trait ValueSelector<Var> {
    fn select_value(&mut self, context: &SelectionContext, decision_variable: Var) -> Predicate;

    fn on_solution(&mut self, _solution: &Solution) {}
}
