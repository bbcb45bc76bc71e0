/// The outcome of a call to the search of the
/// [`ConstraintSatisfactionSolver`](crate::engine::ConstraintSatisfactionSolver).
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub(crate) enum CSPSolverExecutionFlag {
    /// A solution was found; the state is left at the solution so it can be inspected.
    Feasible,
    /// The search space is exhausted without finding a (further) solution.
    Infeasible,
    /// A termination condition stopped the search before it finished.
    Timeout,
}
