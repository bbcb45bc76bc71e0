//! Propagators over set variables.
//!
//! A set variable is bounded from below by its glb (the elements which are definitely in the set)
//! and from above by its lub (the elements which may be in the set). The propagators narrow these
//! bounds by moving undecided elements into the glb or out of the lub; any rule which would leave
//! an element of the glb outside the lub fails with a contradiction.

mod cardinality;
mod disjoint;
mod equality;
mod intersection;
mod lex;
mod subset;
mod union;

pub(crate) use cardinality::*;
pub(crate) use disjoint::*;
pub(crate) use equality::*;
pub(crate) use intersection::*;
pub(crate) use lex::*;
pub(crate) use subset::*;
pub(crate) use union::*;

use crate::propagation::PropagationContext;
use crate::propagation::ReadDomains;
use crate::variables::SetVariable;

/// Whether every set is bound and `relation` holds between their values.
fn all_bound_and(
    context: PropagationContext,
    sets: &[SetVariable],
    relation: impl FnOnce() -> bool,
) -> bool {
    sets.iter().all(|&set| context.is_set_bound(set)) && relation()
}
