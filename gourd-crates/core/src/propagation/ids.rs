use std::fmt::Display;
use std::fmt::Formatter;

use crate::containers::StorageKey;

/// Identifies a propagator in the [`State`](crate::state::State); it is the position at which the
/// propagator was added.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct PropagatorId(pub(crate) u32);

/// The position of a variable in the scope of a propagator, chosen by the propagator when it
/// registers the variable. Notifications carry it back so the propagator knows which of its
/// variables changed.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct LocalId(u32);

impl LocalId {
    pub const fn from(value: u32) -> LocalId {
        LocalId(value)
    }

    pub fn unpack(self) -> u32 {
        self.0
    }
}

/// A variable as seen by one of the propagators watching it.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub(crate) struct PropagatorVarId {
    pub(crate) propagator: PropagatorId,
    pub(crate) variable: LocalId,
}

macro_rules! u32_storage_key {
    ($name:ident) => {
        impl StorageKey for $name {
            fn index(&self) -> usize {
                self.0 as usize
            }

            fn create_from_index(index: usize) -> Self {
                $name(index as u32)
            }
        }
    };
}

u32_storage_key!(PropagatorId);
u32_storage_key!(LocalId);

impl Display for PropagatorId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "propagator #{}", self.0)
    }
}

impl Display for LocalId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
