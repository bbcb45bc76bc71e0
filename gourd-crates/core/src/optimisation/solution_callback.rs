use std::ops::ControlFlow;

use crate::branching::Brancher;
use crate::results::SolutionReference;
use crate::Solver;

/// Called with every improving solution found during optimisation. Returning
/// [`ControlFlow::Break`] stops the optimisation with the current incumbent.
pub trait SolutionCallback<B: Brancher> {
    fn on_solution_callback(
        &mut self,
        solver: &Solver,
        solution: SolutionReference,
        brancher: &B,
    ) -> ControlFlow<()>;
}

impl<T, B> SolutionCallback<B> for T
where
    T: FnMut(&Solver, SolutionReference, &B) -> ControlFlow<()>,
    B: Brancher,
{
    fn on_solution_callback(
        &mut self,
        solver: &Solver,
        solution: SolutionReference,
        brancher: &B,
    ) -> ControlFlow<()> {
        (self)(solver, solution, brancher)
    }
}

impl<T: SolutionCallback<B>, B: Brancher> SolutionCallback<B> for Option<T> {
    fn on_solution_callback(
        &mut self,
        solver: &Solver,
        solution: SolutionReference,
        brancher: &B,
    ) -> ControlFlow<()> {
        if let Some(callback) = self {
            return callback.on_solution_callback(solver, solution, brancher);
        }

        ControlFlow::Continue(())
    }
}

/// A callback which is never present.
pub(crate) type NoCallback<B> = Option<fn(&Solver, SolutionReference<'_>, &B) -> ControlFlow<()>>;
