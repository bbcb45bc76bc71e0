//! Contains the propagator implementations which are used by the [`Solver`].
//!
//! Propagators are not created directly; the builders in [`crate::constraints`] check the
//! arguments of a constraint and then add the corresponding propagators.

pub(crate) mod arithmetic;
mod count;
pub(crate) mod regular;
pub(crate) mod set;

pub(crate) use count::*;

#[cfg(doc)]
use crate::Solver;
