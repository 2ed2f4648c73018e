use super::ValueSelector;
use crate::branching::SelectionContext;
use crate::predicate;
use crate::predicates::Predicate;
use crate::variables::IntegerVariable;

/// Fixes the variable to its upper bound.
///
/// For response-time variables this picks the bound computed by the schedulability propagators
/// directly.
#[derive(Debug, Copy, Clone, Default)]
pub struct InDomainMax;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMax {
    fn select_value(&mut self, context: &SelectionContext, decision_variable: Var) -> Predicate {
        let value = context.upper_bound(&decision_variable);
        predicate!(decision_variable == value)
    }
}
