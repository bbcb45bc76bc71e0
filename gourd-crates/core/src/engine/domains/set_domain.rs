use std::fmt::Display;

use super::DomainChange;
use super::DomainEvent;
use super::EmptyDomain;
use super::IntervalDomain;
use crate::gourd_assert_simple;

/// The domain of a set variable: every set `s` with `glb ⊆ s ⊆ lub`.
///
/// Narrowing grows the `glb` or shrinks the `lub`. An operation that would break `glb ⊆ lub`
/// fails with [`EmptyDomain`] and leaves the domain untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDomain {
    glb: IntervalDomain,
    lub: IntervalDomain,
}

impl SetDomain {
    /// Panics if `glb` is not a subset of `lub`.
    pub fn new(glb: IntervalDomain, lub: IntervalDomain) -> SetDomain {
        gourd_assert_simple!(glb.is_subset_of(&lub), "glb {glb} is not contained in lub {lub}");
        SetDomain { glb, lub }
    }

    /// The elements definitely in the set.
    pub fn glb(&self) -> &IntervalDomain {
        &self.glb
    }

    /// The elements possibly in the set.
    pub fn lub(&self) -> &IntervalDomain {
        &self.lub
    }

    /// The elements in the lub but not in the glb.
    pub fn undecided(&self) -> IntervalDomain {
        self.lub.difference(&self.glb)
    }

    pub fn num_undecided(&self) -> u64 {
        self.lub.len() - self.glb.len()
    }

    /// The set is bound when there is a single set left in the domain, i.e. `glb = lub`.
    pub fn is_bound(&self) -> bool {
        self.glb.len() == self.lub.len()
    }

    /// The smallest possible cardinality of the set.
    pub fn min_cardinality(&self) -> u64 {
        self.glb.len()
    }

    /// The largest possible cardinality of the set.
    pub fn max_cardinality(&self) -> u64 {
        self.lub.len()
    }

    /// Requires `value` to be in the set.
    pub fn include(&mut self, value: i32) -> Result<DomainChange, EmptyDomain> {
        self.include_all(&IntervalDomain::new(value, value))
    }

    /// Requires `value` to not be in the set.
    pub fn exclude(&mut self, value: i32) -> Result<DomainChange, EmptyDomain> {
        self.exclude_all(&IntervalDomain::new(value, value))
    }

    /// Requires all `values` to be in the set (`glb := glb ∪ values`).
    pub fn include_all(&mut self, values: &IntervalDomain) -> Result<DomainChange, EmptyDomain> {
        if !values.is_subset_of(&self.lub) {
            return Err(EmptyDomain);
        }

        let glb = self.glb.union(values);
        Ok(self.update(glb, self.lub.clone()))
    }

    /// Requires none of `values` to be in the set (`lub := lub \ values`).
    pub fn exclude_all(&mut self, values: &IntervalDomain) -> Result<DomainChange, EmptyDomain> {
        if !values.is_disjoint_from(&self.glb) {
            return Err(EmptyDomain);
        }

        let lub = self.lub.difference(values);
        Ok(self.update(self.glb.clone(), lub))
    }

    /// Requires the set to be a subset of `values` (`lub := lub ∩ values`).
    pub fn restrict_to(&mut self, values: &IntervalDomain) -> Result<DomainChange, EmptyDomain> {
        if !self.glb.is_subset_of(values) {
            return Err(EmptyDomain);
        }

        let lub = self.lub.intersection(values);
        Ok(self.update(self.glb.clone(), lub))
    }

    /// Fixes the set to its current glb.
    pub fn collapse_to_glb(&mut self) -> DomainChange {
        self.update(self.glb.clone(), self.glb.clone())
    }

    /// Fixes the set to its current lub.
    pub fn collapse_to_lub(&mut self) -> DomainChange {
        self.update(self.lub.clone(), self.lub.clone())
    }

    fn update(&mut self, glb: IntervalDomain, lub: IntervalDomain) -> DomainChange {
        gourd_assert_simple!(glb.is_subset_of(&lub));

        let mut change = DomainChange::empty();
        let was_bound = self.is_bound();

        if glb.len() != self.glb.len() {
            let _ = change.insert(DomainEvent::GlbChange);
        }
        if lub.len() != self.lub.len() {
            let _ = change.insert(DomainEvent::LubChange);
        }

        self.glb = glb;
        self.lub = lub;

        if !was_bound && self.is_bound() {
            let _ = change.insert(DomainEvent::Assign);
        }

        change
    }
}

impl Display for SetDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{} .. {}]", self.glb, self.lub)
    }
}
