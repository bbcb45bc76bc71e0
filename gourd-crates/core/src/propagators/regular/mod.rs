//! The regular constraint: a sequence of variables has to spell a word accepted by an
//! [`Automaton`].
//!
//! The automaton is unfolded over the sequence into a [`layered_graph::LayeredGraph`]; a value
//! remains in the domain of the `i`-th variable only while some edge in layer `i` which is
//! labelled with it lies on a path from the initial state to a final state.

mod automaton;
mod layered_graph;
mod regular_propagator;

pub use automaton::Automaton;
pub(crate) use regular_propagator::*;

/// The number of nodes in the unfolded automaton above which
/// [`SupportStrategy::Automatic`] switches from rescanning to cached supports by default.
const DEFAULT_SUPPORT_THRESHOLD: usize = 64;

/// How the regular propagator finds the supported values of a layer after edges were removed.
///
/// Both strategies remove exactly the same values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SupportStrategy {
    /// Take the union of the labels of all active edges in the layer.
    Rescan,
    /// Remember one supporting edge per value and only look for a new one once it is removed.
    CachedSupport,
    /// [`SupportStrategy::Rescan`] for unfoldings of at most `threshold` nodes, and
    /// [`SupportStrategy::CachedSupport`] otherwise.
    Automatic { threshold: usize },
}

impl Default for SupportStrategy {
    fn default() -> Self {
        SupportStrategy::Automatic {
            threshold: DEFAULT_SUPPORT_THRESHOLD,
        }
    }
}

/// Options for the regular constraint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RegularOptions {
    pub support_strategy: SupportStrategy,
}
