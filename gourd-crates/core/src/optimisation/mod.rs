//! Contains structures related to optimisation.
//!
//! The [`Solver`] optimises an objective with an [`OptimisationProcedure`]; the procedure which
//! is used by [`Solver::minimise`] and [`Solver::maximise`] is [`BranchAndBound`].

use solution_callback::SolutionCallback;

use crate::branching::Brancher;
use crate::results::OptimisationResult;
use crate::termination::TerminationCondition;
use crate::Solver;
#[cfg(doc)]
use branch_and_bound::BranchAndBound;

pub mod branch_and_bound;
pub mod solution_callback;

pub trait OptimisationProcedure<B: Brancher, Callback: SolutionCallback<B>> {
    fn optimise(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        solver: &mut Solver,
    ) -> OptimisationResult;
}

/// The direction of the optimisation, either maximising or minimising.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OptimisationDirection {
    Maximise,
    Minimise,
}
