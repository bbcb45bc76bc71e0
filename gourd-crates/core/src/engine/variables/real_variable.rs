use enumset::EnumSet;

use super::DomainId;
use crate::engine::cp::Assignments;
use crate::engine::cp::Watchers;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::EmptyDomain;
use crate::engine::predicates::Predicate;

/// A real-valued variable. Its domain is an interval whose bounds are compared using the precision
/// the variable was created with.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct RealVariable {
    domain_id: DomainId,
}

impl RealVariable {
    pub(crate) fn new(domain_id: DomainId) -> RealVariable {
        RealVariable { domain_id }
    }

    pub fn domain_id(&self) -> DomainId {
        self.domain_id
    }

    pub fn lower_bound(&self, assignments: &Assignments) -> f64 {
        assignments.get_real_domain(*self).min()
    }

    pub fn upper_bound(&self, assignments: &Assignments) -> f64 {
        assignments.get_real_domain(*self).max()
    }

    pub fn set_lower_bound(
        &self,
        assignments: &mut Assignments,
        value: f64,
    ) -> Result<(), EmptyDomain> {
        assignments.tighten_real_lower_bound(*self, value).map(|_| ())
    }

    pub fn set_upper_bound(
        &self,
        assignments: &mut Assignments,
        value: f64,
    ) -> Result<(), EmptyDomain> {
        assignments.tighten_real_upper_bound(*self, value).map(|_| ())
    }

    /// The predicate `[self >= bound]`.
    pub fn lower_bound_predicate(&self, bound: f64) -> Predicate {
        Predicate::RealLowerBound {
            real: *self,
            lower_bound: bound,
        }
    }

    /// The predicate `[self <= bound]`.
    pub fn upper_bound_predicate(&self, bound: f64) -> Predicate {
        Predicate::RealUpperBound {
            real: *self,
            upper_bound: bound,
        }
    }

    pub fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        watchers.watch_all(self.domain_id, events);
    }
}

impl std::fmt::Debug for RealVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.domain_id.id)
    }
}

impl std::fmt::Display for RealVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r{}", self.domain_id.id)
    }
}
