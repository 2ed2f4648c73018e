mod assignments;
pub(crate) mod notifications;
pub(crate) mod predicates;
mod propagator_queue;
mod state;
pub(crate) mod termination;
pub(crate) mod test_solver;
pub(crate) mod variables;

pub(crate) use assignments::Assignments;
pub use assignments::EmptyDomain;
pub(crate) use propagator_queue::PropagatorQueue;
pub use state::*;
