//! The interface between propagators and the solver.
//!
//! A propagator enforces one constraint. Given the current domains of the variables in its scope,
//! it removes values that cannot be part of any solution of that constraint, or reports a
//! [`Contradiction`](crate::Contradiction) when no solution is left. Propagators only ever narrow
//! domains; undoing their work on backtracking is the job of the solver.
//!
//! A propagator is created from a [`PropagatorConstructor`], which registers the domain events
//! the propagator wants to be notified of through the [`PropagatorConstructorContext`]. After a
//! notification the propagator is enqueued, and [`Propagator::propagate`] is called until no
//! propagator narrows a domain anymore. Propagators need not be idempotent, but the fixed point
//! they reach together must not depend on the order in which they are run.
//!
//! Propagators reach a [`Solver`] through the [`Constraint`](crate::constraints::Constraint)
//! trait, or are added to a [`State`] directly with [`State::add_propagator`].

mod constructor;
mod contexts;
mod domain_events;
mod ids;
mod propagator;

pub(crate) mod store;

pub use constructor::*;
pub(crate) use contexts::HasTrailedValues;
pub(crate) use contexts::ManipulateTrailedValues;
pub use contexts::HasAssignments;
pub use contexts::NotificationContext;
pub use contexts::PropagationContext;
pub use contexts::PropagationContextMut;
pub use contexts::ReadDomains;
pub use domain_events::DomainEvents;
pub(crate) use ids::PropagatorVarId;
pub use ids::LocalId;
pub use ids::PropagatorId;
pub use propagator::*;
pub use store::PropagatorHandle;

#[cfg(doc)]
use crate::state::State;
#[cfg(doc)]
use crate::Solver;
pub use crate::engine::cp::TrailedInteger;
pub use crate::engine::domains::DomainEvent;
