use crate::engine::cp::Assignments;
use crate::engine::domains::IntervalDomain;
use crate::propagation::HasAssignments;
use crate::variables::DomainId;
use crate::variables::IntegerVariable;
use crate::variables::RealVariable;
use crate::variables::SetVariable;

/// Reading values out of a solution, whether it is borrowed from the solver or owned.
pub trait ProblemSolution: HasAssignments {
    /// # Panics
    /// If `var` is not fixed in the solution.
    fn get_integer_value<Var: IntegerVariable>(&self, var: Var) -> i32 {
        let assignments = self.assignments();
        let value = var.lower_bound(assignments);
        assert_eq!(
            value,
            var.upper_bound(assignments),
            "{var:?} has no single value in this solution"
        );
        value
    }

    /// # Panics
    /// If `set` is not bound in the solution.
    fn get_set_value(&self, set: SetVariable) -> &IntervalDomain {
        assert!(
            set.is_bound(self.assignments()),
            "{set:?} is not bound in this solution"
        );
        set.glb(self.assignments())
    }

    /// The midpoint of the remaining interval of `real`, which is no wider than the precision the
    /// solver fixed it to.
    fn get_real_value(&self, real: RealVariable) -> f64 {
        self.assignments().get_real_domain(real).mid()
    }
}

/// The solution the solver is currently at, borrowed for the duration of a callback.
#[derive(Debug, Copy, Clone)]
pub struct SolutionReference<'a> {
    assignments: &'a Assignments,
}

impl<'a> SolutionReference<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        SolutionReference { assignments }
    }

    /// Every variable of the model, integer or otherwise.
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + 'a {
        self.assignments.get_domains()
    }
}

/// A solution which outlives the search; it keeps the domains but not the trail.
#[derive(Clone, Debug, Default)]
pub struct Solution {
    assignments: Assignments,
}

impl Solution {
    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.assignments.get_domains()
    }

    pub fn as_reference(&self) -> SolutionReference<'_> {
        SolutionReference::new(&self.assignments)
    }
}

impl From<SolutionReference<'_>> for Solution {
    fn from(reference: SolutionReference<'_>) -> Self {
        Solution {
            assignments: reference.assignments.without_history(),
        }
    }
}

impl HasAssignments for SolutionReference<'_> {
    fn assignments(&self) -> &Assignments {
        self.assignments
    }
}

impl HasAssignments for Solution {
    fn assignments(&self) -> &Assignments {
        &self.assignments
    }
}

impl ProblemSolution for SolutionReference<'_> {}
impl ProblemSolution for Solution {}
