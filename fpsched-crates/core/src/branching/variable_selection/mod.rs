//! Selection of the variable to branch on next.
mod first_fail;
mod input_order;
mod variable_selector;

pub use first_fail::FirstFail;
pub use input_order::InputOrder;
pub use variable_selector::VariableSelector;
