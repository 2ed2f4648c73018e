use std::marker::PhantomData;

use super::Brancher;
use super::SelectionContext;
use super::ValueSelector;
use super::VariableSelector;
use crate::predicates::Predicate;
use crate::results::Solution;

/// A [`Brancher`] which picks a variable with its [`VariableSelector`] and then, independently,
/// a value for it with its [`ValueSelector`].
#[derive(Debug)]
pub struct IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect> {
    variable_selector: VariableSelect,
    value_selector: ValueSelect,
    variable_type: PhantomData<Var>,
}

impl<Var, VariableSelect, ValueSelect>
    IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    pub fn new(variable_selector: VariableSelect, value_selector: ValueSelect) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
            variable_type: PhantomData,
        }
    }
}

impl<Var, VariableSelect, ValueSelect> Brancher
    for IndependentVariableValueBrancher<Var, VariableSelect, ValueSelect>
where
    VariableSelect: VariableSelector<Var>,
    ValueSelect: ValueSelector<Var>,
{
    fn next_decision(&mut self, context: &mut SelectionContext) -> Option<Predicate> {
        self.variable_selector
            .select_variable(context)
            .map(|variable| self.value_selector.select_value(context, variable))
    }

    fn on_conflict(&mut self) {
        self.variable_selector.on_conflict();
    }

    fn on_solution(&mut self, solution: &Solution) {
        self.value_selector.on_solution(solution);
    }
}
