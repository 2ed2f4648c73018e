use log::warn;

use super::VariableSelector;
use crate::branching::SelectionContext;
use crate::variables::IntegerVariable;

/// Selects the unfixed variable with the smallest domain; ties go to the earliest variable.
#[derive(Debug, Clone)]
pub struct FirstFail<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> FirstFail<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }

        FirstFail {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for FirstFail<Var> {
    fn select_variable(&mut self, context: &SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_integer_fixed(*variable))
            .min_by_key(|variable| context.get_size_of_domain(*variable))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_the_smallest_unfixed_domain() {
        let assignments = SelectionContext::create_for_testing(&[(0, 10), (3, 3), (4, 6), (0, 2)]);
        let context = SelectionContext::new(&assignments);
        let variables = context.get_domains().collect::<Vec<_>>();

        let mut selector = FirstFail::new(&variables);
        assert_eq!(selector.select_variable(&context), Some(variables[2]));
    }
}
