use crate::engine::Assignments;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;

/// Read access to the domains for the variable and value selectors.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    assignments: &'a Assignments,
}

impl<'a> SelectionContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        SelectionContext { assignments }
    }

    /// The number of values between the bounds, holes included.
    pub fn get_size_of_domain<Var: IntegerVariable>(&self, var: &Var) -> i64 {
        i64::from(self.upper_bound(var)) - i64::from(self.lower_bound(var)) + 1
    }

    pub fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments)
    }

    pub fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments)
    }

    pub fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments, value)
    }

    pub fn is_integer_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        self.lower_bound(var) == self.upper_bound(var)
    }

    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.assignments.get_domains()
    }

    #[cfg(test)]
    pub(crate) fn create_for_testing(domains: &[(i32, i32)]) -> Assignments {
        let mut assignments = Assignments::default();
        for &(lower_bound, upper_bound) in domains {
            let _ = assignments.grow(lower_bound, upper_bound);
        }
        assignments
    }
}
