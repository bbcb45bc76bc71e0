//! Tie-breakers decide between variables which a [`VariableSelector`] considers equally good.
//!
//! A [`TieBreaker`] is given every candidate together with its value through
//! [`TieBreaker::consider`], after which [`TieBreaker::select`] returns the chosen candidate and
//! resets the tie-breaker for the next round.

mod in_order_tie_breaker;

pub use in_order_tie_breaker::InOrderTieBreaker;

#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;

/// Whether the tie-breaker should look for the candidate with the largest or the smallest value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Maximum,
    Minimum,
}

pub trait TieBreaker<Var, Value> {
    /// Offers `variable` with `value` as a candidate.
    fn consider(&mut self, variable: Var, value: Value);

    /// Returns the selected candidate (or [`None`] if no candidate was considered) and resets the
    /// tie-breaker.
    fn select(&mut self) -> Option<Var>;

    fn get_direction(&self) -> Direction;
}
