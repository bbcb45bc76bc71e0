//! Collections used throughout the solver.
//!
//! Solver data is mostly stored in a [`KeyedVec`], indexed by a typed id implementing
//! [`StorageKey`] rather than a bare `usize`. The hash-based collections use the Fnv hasher, so
//! iteration order is the same from run to run.
mod keyed_vec;

use fnv::FnvBuildHasher;
pub use keyed_vec::*;

#[allow(clippy::disallowed_types, reason = "the solver-wide HashMap is defined here")]
pub type HashMap<K, V, Hasher = FnvBuildHasher> = std::collections::HashMap<K, V, Hasher>;
#[allow(clippy::disallowed_types, reason = "the solver-wide HashSet is defined here")]
pub type HashSet<K, Hasher = FnvBuildHasher> = std::collections::HashSet<K, Hasher>;
