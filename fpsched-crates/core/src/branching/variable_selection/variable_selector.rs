use crate::branching::SelectionContext;

/// Decides which variable to branch on. Returns `None` once all its variables are fixed.
pub trait VariableSelector<Var> {
    fn select_variable(&mut self, context: &SelectionContext) -> Option<Var>;

    fn on_conflict(&mut self) {}
}
