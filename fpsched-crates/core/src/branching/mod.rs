//! Decisions of the search: which variable to fix next, and to which value.
//!
//! A [`Brancher`] hands the solver a [`Predicate`](crate::predicates::Predicate) to decide on.
//! The [`IndependentVariableValueBrancher`] composes a [`VariableSelector`] with a
//! [`ValueSelector`]:
//!
//! ```rust
//! # use fpsched_core::Solver;
//! # use fpsched_core::branching::*;
//! # use fpsched_core::termination::Indefinite;
//! let mut solver = Solver::default();
//! let x = solver.new_bounded_integer(0, 10);
//! let y = solver.new_bounded_integer(3, 7);
//!
//! let mut brancher =
//!     IndependentVariableValueBrancher::new(FirstFail::new(&[x, y]), InDomainMax);
//! let result = solver.satisfy(&mut brancher, &mut Indefinite);
//! ```
mod brancher;
mod independent_variable_value_brancher;
mod selection_context;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::Brancher;
pub use independent_variable_value_brancher::IndependentVariableValueBrancher;
pub use selection_context::SelectionContext;
pub use value_selection::*;
pub use variable_selection::*;
