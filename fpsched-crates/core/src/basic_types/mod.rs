mod configuration_error;
mod constraint_operation_error;
mod propagation_status_cp;
mod propositional_conjunction;
mod trail;

pub use configuration_error::*;
pub use constraint_operation_error::*;
pub use propagation_status_cp::*;
pub use propositional_conjunction::*;
pub(crate) use trail::*;
