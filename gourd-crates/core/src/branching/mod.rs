//! Contains structures and traits to define the decision making procedure of the [`Solver`].
//!
//! In general, it provides 3 traits:
//! - The [`Brancher`] which defines how a branching procedure (which selects an unfixed variable
//!   and splits the domain into a [`ChoicePoint`]) should operate; the main method of this trait
//!   is [`Brancher::next_choice_point`]. An example implementation of this trait is the
//!   [`IndependentVariableValueBrancher`].
//! - The [`VariableSelector`] which defines the method required of a variable selector; the main
//!   method of this trait is [`VariableSelector::select_variable`]. An example implementation of
//!   this trait is the [`FirstFail`] strategy.
//! - The [`ValueSelector`] which defines the method required of a value selector; the main method
//!   of this trait is [`ValueSelector::select_value`].
//!
//! A [`Brancher`] is expected to be passed to [`Solver::satisfy`], [`Solver::all_solutions`],
//! [`Solver::minimise`] and [`Solver::maximise`]:
//!
//! ```rust
//! # use gourd_core::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
//! # use gourd_core::branching::value_selection::InDomainMin;
//! # use gourd_core::branching::variable_selection::FirstFail;
//! # use gourd_core::results::SatisfactionResult;
//! # use gourd_core::termination::Indefinite;
//! # use gourd_core::Solver;
//! let mut solver = Solver::default();
//!
//! let variables = vec![
//!     solver.new_bounded_integer(0, 10).unwrap(),
//!     solver.new_bounded_integer(5, 20).unwrap(),
//! ];
//!
//! let mut brancher =
//!     IndependentVariableValueBrancher::new(FirstFail::new(&variables), InDomainMin);
//!
//! let result = solver.satisfy(&mut brancher, &mut Indefinite);
//! assert!(matches!(result, SatisfactionResult::Satisfiable(_)));
//! ```

mod brancher;
pub mod branchers;
mod selection_context;
pub mod tie_breaking;
pub mod value_selection;
pub mod variable_selection;

pub use brancher::*;
pub use selection_context::SelectionContext;

#[cfg(doc)]
use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::FirstFail;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
#[cfg(doc)]
use crate::Solver;
