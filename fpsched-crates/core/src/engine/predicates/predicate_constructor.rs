use super::predicate::Predicate;

/// Creation of [`Predicate`]s over a variable. Used by the [`predicate!`](crate::predicate)
/// macro.
pub trait PredicateConstructor {
    /// The value used to represent a bound.
    type Value;

    /// Creates a lower-bound predicate (e.g. `[x >= v]`).
    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// Creates an upper-bound predicate (e.g. `[x <= v]`).
    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// Creates an equality predicate (e.g. `[x == v]`).
    fn equality_predicate(&self, value: Self::Value) -> Predicate;

    /// Creates a disequality predicate (e.g. `[x != v]`).
    fn disequality_predicate(&self, value: Self::Value) -> Predicate;
}

/// Creates a [`Predicate`] from a comparison between a variable and a value.
///
/// # Example
/// ```rust
/// # use fpsched_core::Solver;
/// # use fpsched_core::predicate;
/// let mut solver = Solver::default();
/// let x = solver.new_bounded_integer(0, 10);
///
/// let lower_bound_predicate = predicate!(x >= 5);
/// assert_eq!(lower_bound_predicate.get_domain(), x);
/// assert_eq!(lower_bound_predicate.get_right_hand_side(), 5);
///
/// let disequality_predicate = predicate!(x != 5);
/// assert!(disequality_predicate.is_not_equal_predicate());
/// ```
#[macro_export]
macro_rules! predicate {
    ($($var:ident).+$([$index:expr])? >= $bound:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.lower_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? <= $bound:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.upper_bound_predicate($bound)
    }};
    ($($var:ident).+$([$index:expr])? == $value:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.equality_predicate($value)
    }};
    ($($var:ident).+$([$index:expr])? != $value:expr) => {{
        #[allow(unused, reason = "could be imported at call-site")]
        use $crate::predicates::PredicateConstructor;
        $($var).+$([$index])?.disequality_predicate($value)
    }};
}

#[cfg(test)]
mod tests {
    use crate::variables::DomainId;

    #[test]
    fn macro_accepts_fields_and_indices() {
        struct Task {
            response: DomainId,
        }

        let task = Task {
            response: DomainId::new(1),
        };
        let durations = [DomainId::new(2), DomainId::new(3)];

        let on_field = predicate!(task.response <= 12);
        assert_eq!(on_field.get_domain(), task.response);
        assert!(on_field.is_upper_bound_predicate());

        let on_index = predicate!(durations[1] >= 4);
        assert_eq!(on_index.get_domain(), durations[1]);
        assert_eq!(on_index.get_right_hand_side(), 4);
    }
}
