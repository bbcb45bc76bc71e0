//! A variable, in the context of the solver, is a view onto a domain. It may forward domain
//! information unaltered, or apply transformations which can be performed without the need of
//! constraints.
//!
//! Every variable, whatever its kind, is identified by a [`DomainId`] indexing the solver's
//! domain store. [`SetVariable`] and [`RealVariable`] wrap the id to give set and real variables
//! their own typed API.

mod affine_view;
mod domain_id;
mod integer_variable;
mod real_variable;
mod set_variable;
mod transformable_variable;

pub use affine_view::AffineView;
pub use domain_id::DomainId;
pub use integer_variable::IntegerVariable;
pub use real_variable::RealVariable;
pub use set_variable::SetVariable;
pub use transformable_variable::TransformableVariable;
