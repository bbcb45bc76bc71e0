//! Defines the constraints that Gourd provides out of the box which can be added to the
//! [`Solver`].
//!
//! A constraint is a relation over variables. In the solver, constraints are enforced through
//! propagators, and therefore constraints can be viewed as a collection of propagators. The
//! builders in this module check their arguments when the constraint is posted, and report a
//! malformed constraint as a [`DeclarationError`].
//!
//! # Example
//! ```
//! # use gourd_core::constraints;
//! # use gourd_core::Solver;
//! let mut solver = Solver::default();
//!
//! let a = solver.new_bounded_integer(0, 3)?;
//! let b = solver.new_bounded_integer(0, 3)?;
//!
//! solver.add_constraint(constraints::binary_equals(a, b))?;
//! # Ok::<(), gourd_core::DeclarationError>(())
//! ```

mod arithmetic;
mod count;
mod real;
mod regular;
mod set;

pub use arithmetic::*;
pub use count::*;
pub use real::*;
pub use regular::*;
pub use set::*;

use crate::propagation::PropagatorConstructor;
use crate::DeclarationError;
use crate::Solver;

/// A [`Constraint`] is a relation over variables. It disqualifies certain partial assignments of
/// making it into a solution of the problem.
///
/// For example, the constraint `a = b` over two variables `a` and `b` only allows assignments to
/// `a` and `b` of the same value, and rejects any assignment where `a` and `b` differ.
pub trait Constraint {
    /// Add the [`Constraint`] to the [`Solver`].
    ///
    /// This method returns a [`DeclarationError`] if the arguments of the [`Constraint`] are
    /// malformed, or if its addition led to a root-level conflict.
    fn post(self, solver: &mut Solver) -> Result<(), DeclarationError>;
}

impl<ConcretePropagator> Constraint for ConcretePropagator
where
    ConcretePropagator: PropagatorConstructor + 'static,
{
    fn post(self, solver: &mut Solver) -> Result<(), DeclarationError> {
        let _ = solver.add_propagator(self)?;
        Ok(())
    }
}

impl<C: Constraint> Constraint for Vec<C> {
    fn post(self, solver: &mut Solver) -> Result<(), DeclarationError> {
        self.into_iter().try_for_each(|c| c.post(solver))
    }
}
