use std::fmt::Debug;
use std::marker::PhantomData;
use std::ops::Index;
use std::ops::IndexMut;

use super::Propagator;
use super::PropagatorId;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;

/// Owns every propagator of a [`State`](crate::state::State), type-erased and keyed by
/// [`PropagatorId`].
#[derive(Default)]
pub(crate) struct PropagatorStore {
    propagators: KeyedVec<PropagatorId, Box<dyn Propagator>>,
}

/// Refers to a propagator while remembering its concrete type, so it can be inspected after it
/// has been added.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct PropagatorHandle<P> {
    id: PropagatorId,
    propagator: PhantomData<P>,
}

impl<P> PropagatorHandle<P> {
    pub fn propagator_id(self) -> PropagatorId {
        self.id
    }
}

impl<P> Copy for PropagatorHandle<P> {}

impl<P> Clone for PropagatorHandle<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl PropagatorStore {
    pub(crate) fn len(&self) -> usize {
        self.propagators.len()
    }

    /// The id which the next pushed propagator receives.
    pub(crate) fn next_id(&self) -> PropagatorId {
        PropagatorId::create_from_index(self.len())
    }

    pub(crate) fn push<P: Propagator>(&mut self, propagator: P) -> PropagatorHandle<P> {
        let id = self.propagators.push(Box::new(propagator));
        PropagatorHandle {
            id,
            propagator: PhantomData,
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &dyn Propagator> + '_ {
        self.propagators.iter().map(|propagator| propagator.as_ref())
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Propagator>> + '_ {
        self.propagators.iter_mut()
    }

    /// `None` if the propagator behind `handle` is not a `P`, which only happens when the handle
    /// comes from another store.
    pub(crate) fn get<P: Propagator>(&self, handle: PropagatorHandle<P>) -> Option<&P> {
        self[handle.id].downcast_ref()
    }

    pub(crate) fn get_mut<P: Propagator>(&mut self, handle: PropagatorHandle<P>) -> Option<&mut P> {
        self[handle.id].downcast_mut()
    }
}

impl Index<PropagatorId> for PropagatorStore {
    type Output = dyn Propagator;

    fn index(&self, id: PropagatorId) -> &Self::Output {
        self.propagators[id].as_ref()
    }
}

impl IndexMut<PropagatorId> for PropagatorStore {
    fn index_mut(&mut self, id: PropagatorId) -> &mut Self::Output {
        self.propagators[id].as_mut()
    }
}

impl Debug for PropagatorStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|propagator| propagator.name()))
            .finish()
    }
}
