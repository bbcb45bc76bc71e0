use crate::basic_types::Contradiction;
use crate::engine::cp::Assignments;
use crate::engine::cp::TrailedInteger;
use crate::engine::cp::TrailedValues;
use crate::engine::domains::EmptyDomain;
use crate::engine::domains::IntervalDomain;
use crate::engine::domains::RealDomain;
use crate::engine::predicates::Predicate;
use crate::propagation::PropagatorId;
use crate::variables::IntegerVariable;
use crate::variables::RealVariable;
use crate::variables::SetVariable;

/// Read-only view of the domains, handed to propagators outside of propagation (satisfaction
/// checks and synchronisation after backtracking).
#[derive(Clone, Copy, Debug)]
pub struct PropagationContext<'a> {
    pub(crate) assignments: &'a Assignments,
}

impl<'a> PropagationContext<'a> {
    pub(crate) fn new(assignments: &'a Assignments) -> Self {
        PropagationContext { assignments }
    }

    /// The current checkpoint of the solver.
    pub fn get_checkpoint(&self) -> usize {
        self.assignments.get_checkpoint()
    }
}

/// Passed to [`Propagator::notify`](super::Propagator::notify). Allows reading the domains and
/// updating trailed values.
#[derive(Debug)]
pub struct NotificationContext<'a> {
    pub(crate) trailed_values: &'a mut TrailedValues,
    pub(crate) assignments: &'a Assignments,
}

impl<'a> NotificationContext<'a> {
    pub(crate) fn new(trailed_values: &'a mut TrailedValues, assignments: &'a Assignments) -> Self {
        Self {
            trailed_values,
            assignments,
        }
    }
}

/// Handed to [`Propagator::propagate`](super::Propagator::propagate): reads and prunes the domains
/// of every kind of variable and updates the propagator's trailed values.
///
/// Integer tightenings which would not change the domain are ignored, so propagators may state
/// bounds without comparing them first.
#[derive(Debug)]
pub struct PropagationContextMut<'a> {
    pub(crate) trailed_values: &'a mut TrailedValues,
    pub(crate) assignments: &'a mut Assignments,
    pub(crate) propagator_id: PropagatorId,
}

impl<'a> PropagationContextMut<'a> {
    pub(crate) fn new(
        trailed_values: &'a mut TrailedValues,
        assignments: &'a mut Assignments,
        propagator_id: PropagatorId,
    ) -> Self {
        PropagationContextMut {
            trailed_values,
            assignments,
            propagator_id,
        }
    }

    pub fn as_readonly(&self) -> PropagationContext<'_> {
        PropagationContext {
            assignments: self.assignments,
        }
    }

    /// The contradiction to report when this propagator detects infeasibility itself.
    pub fn contradiction(&self) -> Contradiction {
        Contradiction::Propagator(self.propagator_id)
    }

    pub fn get_checkpoint(&self) -> usize {
        self.assignments.get_checkpoint()
    }
}

// Integer variables.
impl PropagationContextMut<'_> {
    pub fn remove<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> Result<(), EmptyDomain> {
        if var.contains(self.assignments, value) {
            var.remove(self.assignments, value)
        } else {
            Ok(())
        }
    }

    pub fn set_upper_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound < var.upper_bound(self.assignments) {
            var.set_upper_bound(self.assignments, bound)
        } else {
            Ok(())
        }
    }

    pub fn set_lower_bound<Var: IntegerVariable>(
        &mut self,
        var: &Var,
        bound: i32,
    ) -> Result<(), EmptyDomain> {
        if bound > var.lower_bound(self.assignments) {
            var.set_lower_bound(self.assignments, bound)
        } else {
            Ok(())
        }
    }

    /// Fixes `var` to `value`.
    pub fn assign<Var: IntegerVariable>(&mut self, var: &Var, value: i32) -> Result<(), EmptyDomain> {
        self.set_lower_bound(var, value)?;
        self.set_upper_bound(var, value)
    }

    /// Makes the given predicate true.
    pub fn post(&mut self, predicate: Predicate) -> Result<(), EmptyDomain> {
        self.assignments.post_predicate(predicate).map(|_| ())
    }
}

// Set variables.
impl PropagationContextMut<'_> {
    pub fn include(&mut self, set: SetVariable, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.include_in_set(set, value).map(|_| ())
    }

    pub fn exclude(&mut self, set: SetVariable, value: i32) -> Result<(), EmptyDomain> {
        self.assignments.exclude_from_set(set, value).map(|_| ())
    }

    /// Adds all `values` to the glb of `set`.
    pub fn include_all(
        &mut self,
        set: SetVariable,
        values: &IntervalDomain,
    ) -> Result<(), EmptyDomain> {
        self.assignments.include_all_in_set(set, values).map(|_| ())
    }

    /// Removes all `values` from the lub of `set`.
    pub fn exclude_all(
        &mut self,
        set: SetVariable,
        values: &IntervalDomain,
    ) -> Result<(), EmptyDomain> {
        self.assignments.exclude_all_from_set(set, values).map(|_| ())
    }

    /// Restricts the lub of `set` to `values`.
    pub fn restrict(&mut self, set: SetVariable, values: &IntervalDomain) -> Result<(), EmptyDomain> {
        self.assignments.restrict_set(set, values).map(|_| ())
    }

    pub fn collapse_to_glb(&mut self, set: SetVariable) -> Result<(), EmptyDomain> {
        self.assignments.collapse_set_to_glb(set).map(|_| ())
    }

    pub fn collapse_to_lub(&mut self, set: SetVariable) -> Result<(), EmptyDomain> {
        self.assignments.collapse_set_to_lub(set).map(|_| ())
    }
}

// Real variables.
impl PropagationContextMut<'_> {
    pub fn set_real_lower_bound(&mut self, real: RealVariable, bound: f64) -> Result<(), EmptyDomain> {
        real.set_lower_bound(self.assignments, bound)
    }

    pub fn set_real_upper_bound(&mut self, real: RealVariable, bound: f64) -> Result<(), EmptyDomain> {
        real.set_upper_bound(self.assignments, bound)
    }
}

/// Gives read access to the domains; every type implementing it gets [`ReadDomains`].
pub trait HasAssignments {
    fn assignments(&self) -> &Assignments;
}

pub(crate) trait HasTrailedValues {
    fn trailed_values(&self) -> &TrailedValues;
    fn trailed_values_mut(&mut self) -> &mut TrailedValues;
}

macro_rules! has_assignments {
    ($($context:ident),+) => {
        $(impl HasAssignments for $context<'_> {
            fn assignments(&self) -> &Assignments {
                self.assignments
            }
        })+
    };
}

macro_rules! has_trailed_values {
    ($($context:ident),+) => {
        $(impl HasTrailedValues for $context<'_> {
            fn trailed_values(&self) -> &TrailedValues {
                self.trailed_values
            }

            fn trailed_values_mut(&mut self) -> &mut TrailedValues {
                self.trailed_values
            }
        })+
    };
}

has_assignments!(PropagationContext, NotificationContext, PropagationContextMut);
has_trailed_values!(NotificationContext, PropagationContextMut);

/// Integers owned by a propagator which are restored together with the domains.
pub(crate) trait ManipulateTrailedValues: HasTrailedValues {
    fn new_trailed_integer(&mut self, initial: i64) -> TrailedInteger {
        self.trailed_values_mut().grow(initial)
    }

    fn value(&self, integer: TrailedInteger) -> i64 {
        self.trailed_values().read(integer)
    }

    fn add_assign(&mut self, integer: TrailedInteger, delta: i64) {
        self.trailed_values_mut().add_assign(integer, delta);
    }

    fn assign_trailed(&mut self, integer: TrailedInteger, value: i64) {
        self.trailed_values_mut().assign(integer, value);
    }
}

impl<T: HasTrailedValues> ManipulateTrailedValues for T {}

/// Read access to the domains of all kinds of variables.
pub trait ReadDomains: HasAssignments {
    /// Whether `predicate` holds in every remaining assignment.
    fn is_predicate_satisfied(&self, predicate: Predicate) -> bool {
        self.assignments().evaluate_predicate(predicate) == Some(true)
    }

    /// Whether `predicate` holds in no remaining assignment.
    fn is_predicate_falsified(&self, predicate: Predicate) -> bool {
        self.assignments().evaluate_predicate(predicate) == Some(false)
    }

    fn is_fixed<Var: IntegerVariable>(&self, var: &Var) -> bool {
        var.is_fixed(self.assignments())
    }

    fn lower_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.lower_bound(self.assignments())
    }

    fn upper_bound<Var: IntegerVariable>(&self, var: &Var) -> i32 {
        var.upper_bound(self.assignments())
    }

    fn contains<Var: IntegerVariable>(&self, var: &Var, value: i32) -> bool {
        var.contains(self.assignments(), value)
    }

    fn domain_size<Var: IntegerVariable>(&self, var: &Var) -> u64 {
        var.size(self.assignments())
    }

    fn iterate_domain<Var: IntegerVariable>(&self, var: &Var) -> impl Iterator<Item = i32> {
        var.iterate_domain(self.assignments())
    }

    /// The elements definitely in `set`.
    fn glb(&self, set: SetVariable) -> &IntervalDomain {
        set.glb(self.assignments())
    }

    /// The elements possibly in `set`.
    fn lub(&self, set: SetVariable) -> &IntervalDomain {
        set.lub(self.assignments())
    }

    fn is_set_bound(&self, set: SetVariable) -> bool {
        set.is_bound(self.assignments())
    }

    fn real_domain(&self, real: RealVariable) -> RealDomain {
        *self.assignments().get_real_domain(real)
    }
}

impl<T: HasAssignments> ReadDomains for T {}
