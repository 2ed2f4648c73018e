use log::warn;

use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::IntegerVariable;

/// Selects the first variable, in the given order, which is not fixed.
#[derive(Debug, Clone)]
pub struct InputOrder<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> InputOrder<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }

        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for InputOrder<Var> {
    fn select_variable(&mut self, context: &SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .find(|variable| !context.is_integer_fixed(*variable))
            .cloned()
    }
}
