use super::DomainEvents;
use super::HasAssignments;
use super::HasTrailedValues;
use super::LocalId;
use super::Propagator;
use super::PropagatorId;
use super::PropagatorVarId;
#[cfg(doc)]
use crate::Solver;
use crate::engine::cp::Assignments;
use crate::engine::cp::TrailedValues;
use crate::engine::cp::Watchers;
use crate::engine::State;
use crate::variables::IntegerVariable;
use crate::variables::RealVariable;
use crate::variables::SetVariable;

/// A propagator constructor creates a fully initialized instance of a [`Propagator`].
///
/// The constructor is responsible for indicating on which events the propagator should be
/// enqueued. Additionally, the propagator can be initialized with values that come from the
/// initial domains of the variables.
pub trait PropagatorConstructor {
    /// The propagator that is produced by this constructor.
    type PropagatorImpl: Propagator;

    /// Create the propagator instance from `Self`.
    fn create(self, context: PropagatorConstructorContext) -> Self::PropagatorImpl;
}

/// [`PropagatorConstructorContext`] is used when [`Propagator`]s are initialised after creation.
///
/// It represents a communication point between the [`Solver`] and the [`Propagator`].
/// Propagators use the [`PropagatorConstructorContext`] to register to domain changes
/// of variables, to retrieve the current bounds of variables and to create trailed values.
#[derive(Debug)]
pub struct PropagatorConstructorContext<'a> {
    state: &'a mut State,
    pub(crate) propagator_id: PropagatorId,
}

impl PropagatorConstructorContext<'_> {
    pub(crate) fn new(
        propagator_id: PropagatorId,
        state: &mut State,
    ) -> PropagatorConstructorContext<'_> {
        PropagatorConstructorContext {
            propagator_id,
            state,
        }
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of an integer variable.
    ///
    /// The domain events determine when [`Propagator::notify()`] will be called on the
    /// propagator. The [`LocalId`] is internal information related to the propagator, which is
    /// used when calling [`Propagator::notify()`] to identify the variable.
    ///
    /// Each variable *must* have a unique [`LocalId`]. Most often this would be its index of the
    /// variable in the internal array of variables.
    pub fn register(
        &mut self,
        var: impl IntegerVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        let mut watchers = self.watchers(local_id);
        var.watch_all(&mut watchers, domain_events.events());
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of a set variable.
    pub fn register_set(&mut self, set: SetVariable, domain_events: DomainEvents, local_id: LocalId) {
        let mut watchers = self.watchers(local_id);
        set.watch_all(&mut watchers, domain_events.events());
    }

    /// Subscribes the propagator to the given [`DomainEvents`] of a real variable.
    pub fn register_real(
        &mut self,
        real: RealVariable,
        domain_events: DomainEvents,
        local_id: LocalId,
    ) {
        let mut watchers = self.watchers(local_id);
        real.watch_all(&mut watchers, domain_events.events());
    }

    fn watchers(&mut self, local_id: LocalId) -> Watchers<'_> {
        let propagator_var = PropagatorVarId {
            propagator: self.propagator_id,
            variable: local_id,
        };

        Watchers::new(propagator_var, &mut self.state.watch_list)
    }
}

impl HasAssignments for PropagatorConstructorContext<'_> {
    fn assignments(&self) -> &Assignments {
        &self.state.assignments
    }
}

impl HasTrailedValues for PropagatorConstructorContext<'_> {
    fn trailed_values(&self) -> &TrailedValues {
        &self.state.trailed_values
    }

    fn trailed_values_mut(&mut self) -> &mut TrailedValues {
        &mut self.state.trailed_values
    }
}
