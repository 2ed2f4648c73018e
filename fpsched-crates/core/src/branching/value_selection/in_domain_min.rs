use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::predicates::Predicate;
use crate::variables::IntegerVariable;

/// Fixes the variable to its lower bound.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMin;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMin {
    fn select_value(&mut self, context: &SelectionContext, decision_variable: Var) -> Predicate {
        let value = context.lower_bound(&decision_variable);
        predicate!(decision_variable == value)
    }
}
