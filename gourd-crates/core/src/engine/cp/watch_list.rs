use enum_map::EnumMap;
use enumset::EnumSet;

use crate::containers::KeyedVec;
use crate::engine::domains::DomainEvent;
use crate::engine::variables::DomainId;
use crate::propagation::PropagatorId;
use crate::propagation::PropagatorVarId;

/// For every domain and every [`DomainEvent`], the propagators (and their local variable ids)
/// that need to be notified when the event happens on that domain.
#[derive(Default, Debug, Clone)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, EnumMap<DomainEvent, Vec<PropagatorVarId>>>,
    /// For every propagator, the domains it watches.
    scopes: KeyedVec<PropagatorId, Vec<DomainId>>,
}

impl WatchList {
    pub(crate) fn grow(&mut self) {
        let _ = self.watchers.push(EnumMap::default());
    }

    pub(crate) fn get_affected_propagators(
        &self,
        event: DomainEvent,
        domain: DomainId,
    ) -> &[PropagatorVarId] {
        &self.watchers[domain][event]
    }

    /// The number of registrations on `domain`, over all events. Used as the degree of a variable
    /// by the search heuristics.
    pub(crate) fn num_watchers(&self, domain: DomainId) -> usize {
        self.watchers[domain].values().map(Vec::len).sum()
    }

    /// The domains `propagator` registered for, in order of registration.
    pub(crate) fn scope(&self, propagator: PropagatorId) -> &[DomainId] {
        self.scopes
            .get(propagator)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Used to register a propagator for notifications about events to a particular variable.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_var: PropagatorVarId,
    watch_list: &'a mut WatchList,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_var: PropagatorVarId, watch_list: &'a mut WatchList) -> Self {
        Watchers {
            propagator_var,
            watch_list,
        }
    }

    pub(crate) fn watch_all(&mut self, domain: DomainId, events: EnumSet<DomainEvent>) {
        let propagator = self.propagator_var.propagator;
        self.watch_list.scopes.grow_to_include(propagator, vec![]);
        if !self.watch_list.scopes[propagator].contains(&domain) {
            self.watch_list.scopes[propagator].push(domain);
        }

        let watcher = &mut self.watch_list.watchers[domain];

        for event in events {
            let event_watchers = &mut watcher[event];

            if !event_watchers.contains(&self.propagator_var) {
                event_watchers.push(self.propagator_var)
            }
        }
    }
}
