//! A constraint is a relation over variables. In the solver, constraints are enforced through
//! propagators, and a constraint can be seen as a collection of them.
mod fixed_priority;

pub use fixed_priority::*;

use crate::basic_types::ConstraintOperationError;
use crate::propagation::PropagatorConstructor;
use crate::Solver;

/// A relation over variables which can be added to a [`Solver`].
pub trait Constraint {
    /// Adds the constraint to the solver.
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError>;
}

impl<Constructor> Constraint for Constructor
where
    Constructor: PropagatorConstructor,
    Constructor::PropagatorImpl: 'static,
{
    fn post(self, solver: &mut Solver) -> Result<(), ConstraintOperationError> {
        solver.add_propagator(self).map(|_| ())
    }
}
