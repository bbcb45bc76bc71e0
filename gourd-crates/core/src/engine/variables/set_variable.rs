use enumset::EnumSet;

use super::DomainId;
use crate::engine::cp::Assignments;
use crate::engine::cp::Watchers;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::EmptyDomain;
use crate::engine::domains::IntervalDomain;
use crate::engine::predicates::Predicate;

/// A set variable, whose domain is every set between a lower bound (the glb, elements that are
/// definitely in the set) and an upper bound (the lub, elements that possibly are in the set).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SetVariable {
    domain_id: DomainId,
}

impl SetVariable {
    pub(crate) fn new(domain_id: DomainId) -> SetVariable {
        SetVariable { domain_id }
    }

    pub fn domain_id(&self) -> DomainId {
        self.domain_id
    }

    pub fn glb<'a>(&self, assignments: &'a Assignments) -> &'a IntervalDomain {
        assignments.get_set_domain(*self).glb()
    }

    pub fn lub<'a>(&self, assignments: &'a Assignments) -> &'a IntervalDomain {
        assignments.get_set_domain(*self).lub()
    }

    pub fn is_bound(&self, assignments: &Assignments) -> bool {
        assignments.get_set_domain(*self).is_bound()
    }

    pub fn include(&self, assignments: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        assignments.include_in_set(*self, value).map(|_| ())
    }

    pub fn exclude(&self, assignments: &mut Assignments, value: i32) -> Result<(), EmptyDomain> {
        assignments.exclude_from_set(*self, value).map(|_| ())
    }

    /// The predicate `[value ∈ self]`.
    pub fn contains_predicate(&self, value: i32) -> Predicate {
        Predicate::Contains {
            set: *self,
            element: value,
        }
    }

    /// The predicate `[value ∉ self]`.
    pub fn excludes_predicate(&self, value: i32) -> Predicate {
        Predicate::Excludes {
            set: *self,
            element: value,
        }
    }

    pub fn watch_all(&self, watchers: &mut Watchers<'_>, events: EnumSet<DomainEvent>) {
        watchers.watch_all(self.domain_id, events);
    }
}

impl std::fmt::Debug for SetVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}", self.domain_id.id)
    }
}

impl std::fmt::Display for SetVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "S{}", self.domain_id.id)
    }
}
