//! # fpsched
//! Response-time analysis for fixed-priority preemptive scheduling, as a propagator of a
//! constraint solver.
//!
//! During design-space exploration every task has to be mapped to a scheduler. For each
//! scheduler a [`FixedPrioritySchedulabilityPropagator`](propagators::FixedPrioritySchedulabilityPropagator)
//! computes the worst-case response time of the tasks mapped to it, tightens the response-time
//! variables to it, and rejects mappings in which a task cannot meet its response-time bound.
//!
//! ```rust
//! # use fpsched_core::Solver;
//! # use fpsched_core::branching::*;
//! # use fpsched_core::constraints::*;
//! # use fpsched_core::results::SatisfactionResult;
//! # use fpsched_core::termination::Indefinite;
//! let mut solver = Solver::default();
//!
//! // Two tasks which can run on scheduler 0 or 1. Together they do not fit on one scheduler.
//! let mut workload = FixedPriorityWorkload::default();
//! for (priority, period, duration) in [(1, 5, 4), (2, 5, 2)] {
//!     let _ = workload.push_task(FixedPriorityTask {
//!         priority,
//!         period,
//!         execution: solver.new_sparse_integer(vec![0, 1]),
//!         blocking: solver.new_bounded_integer(0, 0),
//!         duration: solver.new_bounded_integer(duration, duration),
//!         response: solver.new_bounded_integer(0, period as i32),
//!     });
//! }
//!
//! for scheduler in [0, 1] {
//!     let constraint = fixed_priority_schedulability(scheduler, &workload, Default::default())
//!         .expect("the workload is well-formed");
//!     solver.add_constraint(constraint).expect("no conflict without a mapping");
//! }
//!
//! let mut brancher =
//!     IndependentVariableValueBrancher::new(InputOrder::new(&workload.execution), InDomainMin);
//! let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
//! else {
//!     panic!("the tasks fit on separate schedulers");
//! };
//!
//! assert_ne!(
//!     solution.get_integer_value(workload.execution[0]),
//!     solution.get_integer_value(workload.execution[1])
//! );
//! ```
#[doc(hidden)]
pub mod asserts;
pub(crate) mod basic_types;
pub(crate) mod engine;

pub mod branching;
pub mod constraints;
pub mod containers;
pub mod propagation;
pub mod propagators;
pub mod statistics;

pub use convert_case;

// A private module with public use, so that `fpsched_core::Solver` works instead of
// `fpsched_core::api::Solver`.
mod api;

pub use api::*;

pub use crate::basic_types::ConfigurationError;
pub use crate::basic_types::ConflictCause;
pub use crate::basic_types::ConstraintOperationError;
