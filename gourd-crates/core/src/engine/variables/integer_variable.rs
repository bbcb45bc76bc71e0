use std::fmt::Debug;

use enumset::EnumSet;

use super::TransformableVariable;
use crate::engine::cp::Assignments;
use crate::engine::cp::Watchers;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::EmptyDomain;
use crate::engine::predicates::PredicateConstructor;

/// A trait specifying the required behaviour of an integer variable such as retrieving a
/// lower-bound ([`IntegerVariable::lower_bound`]).
pub trait IntegerVariable:
    Clone + Debug + PredicateConstructor<Value = i32> + TransformableVariable<Self::AffineView>
{
    type AffineView: IntegerVariable;

    /// Get the lower bound of the variable.
    fn lower_bound(&self, assignments: &Assignments) -> i32;

    /// Get the upper bound of the variable.
    fn upper_bound(&self, assignments: &Assignments) -> i32;

    /// Determine whether the value is in the domain of this variable.
    fn contains(&self, assignments: &Assignments, value: i32) -> bool;

    /// The number of values left in the domain.
    fn size(&self, assignments: &Assignments) -> u64;

    /// Iterate over the values of the domain.
    fn iterate_domain(&self, assignments: &Assignments) -> impl Iterator<Item = i32>;

    fn is_fixed(&self, assignments: &Assignments) -> bool {
        self.lower_bound(assignments) == self.upper_bound(assignments)
    }

    /// Remove a value from the domain of this variable.
    fn remove(&self, assignments: &mut Assignments, value: i32) -> Result<(), EmptyDomain>;

    /// Tighten the lower bound of the domain of this variable.
    fn set_lower_bound(&self, assignments: &mut Assignments, value: i32)
        -> Result<(), EmptyDomain>;

    /// Tighten the upper bound of the domain of this variable.
    fn set_upper_bound(&self, assignments: &mut Assignments, value: i32)
        -> Result<(), EmptyDomain>;

    /// Register a watch for this variable on the given domain events.
    fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>);

    /// Translate an event on the underlying domain into an event on this variable.
    fn unpack_event(&self, event: DomainEvent) -> DomainEvent;
}
