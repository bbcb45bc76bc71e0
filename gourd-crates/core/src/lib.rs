//! # Gourd
//! A finite-domain constraint programming solver over integer, set and real variables.
//!
//! A model is built on a [`Solver`]: variables are created with their initial domains and
//! [`constraints`] are posted on them. Every constraint is enforced by propagators which prune the
//! domains to a fixed point, and a depth-first search driven by a [`Brancher`] explores the
//! remaining choices, undoing its decisions through a trail when it backtracks.
//!
//! # Example
//! ```rust
//! # use gourd_core::constraints;
//! # use gourd_core::results::ProblemSolution;
//! # use gourd_core::results::SatisfactionResult;
//! # use gourd_core::termination::Indefinite;
//! # use gourd_core::Solver;
//! let mut solver = Solver::default();
//!
//! let x = solver.new_bounded_integer(0, 5)?;
//! let y = solver.new_bounded_integer(0, 5)?;
//! solver.add_constraint(constraints::binary_less_than(x, y))?;
//! solver.add_constraint(constraints::greater_than_or_equals([x, y], 7))?;
//!
//! let mut brancher = solver.default_brancher();
//! let SatisfactionResult::Satisfiable(solution) = solver.satisfy(&mut brancher, &mut Indefinite)
//! else {
//!     panic!("the model has solutions");
//! };
//!
//! assert!(solution.get_integer_value(x) < solution.get_integer_value(y));
//! assert!(solution.get_integer_value(x) + solution.get_integer_value(y) >= 7);
//! # Ok::<(), gourd_core::DeclarationError>(())
//! ```
//!
//! # Termination
//! Every solving method takes a [`TerminationCondition`]; when it triggers before the search is
//! complete, the result is reported as unknown (or, when optimising, as the best solution found so
//! far) instead of as an error.
pub(crate) mod basic_types;
pub mod containers;
pub(crate) mod engine;
#[doc(hidden)]
pub(crate) mod gourd_asserts;
pub(crate) mod propagators;

#[cfg(doc)]
use crate::branching::Brancher;
#[cfg(doc)]
use crate::termination::TerminationCondition;

pub mod branching;
pub mod constraints;
pub mod optimisation;
pub mod propagation;
pub mod statistics;

pub use convert_case;
pub use rand;

// We declare a private module with public use, so that all exports from API are exports directly
// from the crate.
//
// Example:
// `use gourd_core::Solver;`
// vs.
// `use gourd_core::api::Solver;`
mod api;

pub use api::*;

pub use crate::api::solver::DefaultBrancher;
pub use crate::api::solver::Solver;
pub use crate::basic_types::Contradiction;
pub use crate::basic_types::DeclarationError;
pub use crate::basic_types::PropagationStatusCP;
