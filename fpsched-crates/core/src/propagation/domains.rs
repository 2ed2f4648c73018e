use crate::engine::Assignments;
use crate::predicates::Predicate;
use crate::variables::IntegerVariable;

/// Read-only access to the variable domains.
#[derive(Clone, Copy, Debug)]
pub struct Domains<'a> {
    pub(crate) assignments: &'a Assignments,
}

impl<'a> Domains<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        Domains { assignments }
    }
}

/// Implemented by every context which can see the [`Assignments`]; gives it [`ReadDomains`].
pub(crate) trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

impl HasAssignments for Domains<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

/// Queries on the current domains of variables.
pub trait ReadDomains {
    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32;

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32;

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool;

    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    /// Returns the value of `var` if its domain is a singleton.
    fn fixed_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        self.is_fixed(var).then(|| self.lower_bound(var))
    }

    /// `Some(true)` if `predicate` certainly holds, `Some(false)` if it certainly does not.
    fn evaluate_predicate(&self, predicate: Predicate) -> Option<bool>;
}

impl<T: HasAssignments> ReadDomains for T {
    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn evaluate_predicate(&self, predicate: Predicate) -> Option<bool> {
        self.assignments().evaluate_predicate(predicate)
    }
}
