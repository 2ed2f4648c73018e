use crate::containers::StorageKey;
use crate::variables::DomainId;
#[cfg(doc)]
use crate::Solver;

/// The outcome of [`Solver::satisfy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SatisfactionResult {
    /// Every variable the brancher decides on is fixed and no propagator objects.
    Satisfiable(Solution),
    /// The search space was exhausted without a solution.
    Unsatisfiable,
    /// The termination condition stopped the search first.
    Unknown,
}

/// A value for every variable of the [`Solver`], taken when the search found a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    values: Vec<i32>,
}

impl Solution {
    pub(crate) fn new(values: Vec<i32>) -> Self {
        Solution { values }
    }

    pub fn num_domains(&self) -> usize {
        self.values.len()
    }

    /// The value of `variable`. For a variable the brancher never fixed this is its lower bound.
    pub fn get_integer_value(&self, variable: DomainId) -> i32 {
        self.values[variable.index()]
    }
}
