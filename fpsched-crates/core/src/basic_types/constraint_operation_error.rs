use thiserror::Error;

use super::ConfigurationError;
#[cfg(doc)]
use crate::constraints::Constraint;
#[cfg(doc)]
use crate::Solver;

/// Errors related to adding constraints to the [`Solver`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintOperationError {
    #[error("Adding the propagator failed because the initial propagation detected a conflict")]
    InfeasiblePropagator,
    #[error("A constraint was added to a solver which is already in an infeasible state")]
    InfeasibleState,
    #[error("The constraint could not be built: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),
}
