mod outputs;
pub(crate) mod solver;

pub use solver::DefaultBrancher;
pub use solver::Solver;
pub use solver::SolverOptions;

pub mod results {
    //! The outputs of solving with the [`Solver`].
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::api::outputs::Solution;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! The variables of the [`Solver`].
    //!
    //! Integer variables are represented by [`DomainId`]s, created with
    //! [`Solver::new_bounded_integer`] or [`Solver::new_sparse_integer`]. Propagators are generic
    //! over [`IntegerVariable`].
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::IntegerVariable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod predicates {
    //! Atomic statements over a single variable, such as `[x <= 5]`, and conjunctions of them.
    pub use crate::basic_types::PropositionalConjunction;
    pub use crate::engine::predicates::Predicate;
    pub use crate::engine::predicates::PredicateConstructor;
    pub use crate::engine::predicates::PredicateType;
}

pub mod termination {
    //! Conditions which stop the search of the [`Solver`] before it reaches a conclusion, such as
    //! a [`TimeBudget`].
    pub use crate::engine::termination::*;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod options {
    //! The options of the [`Solver`] and of the constraints it provides.
    pub use crate::api::solver::SolverOptions;
    pub use crate::propagators::fixed_priority::FixedPriorityOptions;
    pub use crate::propagators::fixed_priority::PriorityOrdering;
    pub use crate::propagators::fixed_priority::ResponseTightening;
    pub use crate::propagators::fixed_priority::TiePolicy;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod state {
    //! The bound store together with the propagators, for driving propagation without the
    //! [`Solver`]'s search.
    pub use crate::engine::Conflict;
    pub use crate::engine::EmptyDomain;
    pub use crate::engine::EmptyDomainConflict;
    pub use crate::engine::State;
    pub use crate::propagation::PropagatorHandle;
    pub use crate::propagation::PropagatorId;
    #[cfg(doc)]
    use crate::Solver;
}
