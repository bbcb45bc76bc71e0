use crate::basic_types::CSPSolverExecutionFlag;
use crate::branching::Brancher;
use crate::results::Solution;
use crate::termination::TerminationCondition;
use crate::Solver;

/// Enumerates the solutions of a model one at a time.
///
/// After a solution is reported, the search resumes with the next untried alternative of the
/// innermost open choice point, so no solution is reported twice. Dropping the iterator restores
/// the solver to the root.
#[derive(Debug)]
pub struct SolutionIterator<'solver, 'brancher, 'termination, B: Brancher, T> {
    solver: &'solver mut Solver,
    brancher: &'brancher mut B,
    termination: &'termination mut T,
    progress: Progress,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Progress {
    NotStarted,
    Searching { found_any: bool },
    Exhausted,
}

impl<'solver, 'brancher, 'termination, B: Brancher, T: TerminationCondition>
    SolutionIterator<'solver, 'brancher, 'termination, B, T>
{
    pub(crate) fn new(
        solver: &'solver mut Solver,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> Self {
        SolutionIterator {
            solver,
            brancher,
            termination,
            progress: Progress::NotStarted,
        }
    }

    /// Searches for the next solution. The brancher is told about every solution through
    /// [`Brancher::on_solution`].
    pub fn next_solution(&mut self) -> IteratedSolution {
        let engine = &mut self.solver.satisfaction_solver;
        let (flag, found_any) = match self.progress {
            Progress::Exhausted => return IteratedSolution::Finished,
            Progress::NotStarted => (engine.solve(self.termination, self.brancher), false),
            Progress::Searching { found_any } => (
                engine.find_next_solution(self.termination, self.brancher),
                found_any,
            ),
        };

        let outcome = match flag {
            CSPSolverExecutionFlag::Feasible => {
                self.progress = Progress::Searching { found_any: true };
                return IteratedSolution::Solution(self.solver.get_solution_reference().into());
            }
            CSPSolverExecutionFlag::Infeasible if found_any => IteratedSolution::Finished,
            CSPSolverExecutionFlag::Infeasible => IteratedSolution::Unsatisfiable,
            CSPSolverExecutionFlag::Timeout => IteratedSolution::Unknown,
        };

        self.progress = Progress::Exhausted;
        self.solver
            .satisfaction_solver
            .restore_state_at_root(self.brancher);
        outcome
    }
}

impl<B: Brancher, T> Drop for SolutionIterator<'_, '_, '_, B, T> {
    fn drop(&mut self) {
        self.solver
            .satisfaction_solver
            .restore_state_at_root(self.brancher);
    }
}

/// The outcome of [`SolutionIterator::next_solution`].
#[derive(Debug, Clone)]
pub enum IteratedSolution {
    Solution(Solution),
    /// Every solution has been reported.
    Finished,
    /// The termination condition triggered before the next solution was found.
    Unknown,
    /// The model has no solutions at all.
    Unsatisfiable,
}
