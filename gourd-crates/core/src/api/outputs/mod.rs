pub(crate) mod solution_iterator;

use crate::basic_types::Solution;
#[cfg(doc)]
use crate::termination::TerminationCondition;
#[cfg(doc)]
use crate::Solver;

/// The result of a call to [`Solver::satisfy`].
///
/// The solver is always restored to the root before this result is returned, so it can be used
/// for further solving.
#[derive(Debug, Clone)]
pub enum SatisfactionResult {
    /// Indicates that a solution was found.
    Satisfiable(Solution),
    /// Indicates that there is no solution to the satisfaction problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

/// The result of a call to [`Solver::minimise`], [`Solver::maximise`] or [`Solver::optimise`].
#[derive(Debug, Clone)]
pub enum OptimisationResult {
    /// Indicates that an optimal solution has been found and proven to be optimal. It provides an
    /// instance of [`Solution`] which contains the optimal solution.
    Optimal(Solution),
    /// Indicates that a solution was found and provides an instance of [`Solution`] which contains
    /// best known solution by the solver. Optimality was not proven because a
    /// [`TerminationCondition`] triggered.
    Satisfiable(Solution),
    /// Indicates that there is no solution to the problem.
    Unsatisfiable,
    /// Indicates that it is not known whether a solution exists. This is likely due to a
    /// [`TerminationCondition`] triggering.
    Unknown,
}

/// The result of a call to [`Solver::all_solutions`].
#[derive(Debug, Clone, Default)]
pub struct AllSolutions {
    /// The solutions in the order in which they were found.
    pub solutions: Vec<Solution>,
    /// Whether every solution was found; `false` when a [`TerminationCondition`] stopped the
    /// enumeration early.
    pub is_complete: bool,
}
