use thiserror::Error;

use crate::engine::EmptyDomain;
use crate::propagation::PropagatorId;

/// The outcome of a failed propagation. A contradiction is an expected event during search; the
/// search engine recovers from it by backtracking.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contradiction {
    /// A domain operation removed the last remaining value(s) of a variable.
    #[error("a domain was narrowed to the empty set")]
    EmptyDomain,
    /// The consistency routine of a propagator found the current domains to be infeasible.
    #[error("{0} detected an inconsistency")]
    Propagator(PropagatorId),
}

impl From<EmptyDomain> for Contradiction {
    fn from(_: EmptyDomain) -> Self {
        Contradiction::EmptyDomain
    }
}

/// The result of invoking a propagator.
pub type PropagationStatusCP = Result<(), Contradiction>;
