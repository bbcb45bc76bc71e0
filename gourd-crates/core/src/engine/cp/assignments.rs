use std::vec::Drain;

use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::engine::domains::Domain;
use crate::engine::domains::DomainChange;
use crate::engine::domains::DomainEvent;
use crate::engine::domains::EmptyDomain;
use crate::engine::domains::FiniteDomain;
use crate::engine::domains::IntegerDomain;
use crate::engine::domains::IntervalDomain;
use crate::engine::domains::RealDomain;
use crate::engine::domains::SetDomain;
use crate::engine::predicates::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::variables::RealVariable;
use crate::engine::variables::SetVariable;

/// The current domains of all variables, together with the trail needed to restore them.
///
/// The first time a domain is modified after a checkpoint, a snapshot of the domain is pushed onto
/// the trail; later modifications at the same checkpoint are applied in place. Synchronising to an
/// earlier checkpoint restores the snapshots newest first, so every domain is restored to exactly
/// the state it had when that checkpoint was the current one.
#[derive(Clone, Debug, Default)]
pub struct Assignments {
    domains: KeyedVec<DomainId, Domain>,
    /// The checkpoint at which the domain was last snapshotted.
    last_recorded: KeyedVec<DomainId, usize>,
    trail: Trail<DomainSnapshot>,
    /// The events that happened since the last time they were drained.
    events: Vec<(DomainEvent, DomainId)>,
}

#[derive(Clone, Debug)]
struct DomainSnapshot {
    domain_id: DomainId,
    domain: Domain,
    last_recorded: usize,
}

impl Assignments {
    pub(crate) fn grow(&mut self, domain: Domain) -> DomainId {
        let _ = self.last_recorded.push(self.trail.get_checkpoint());
        self.domains.push(domain)
    }

    pub fn num_domains(&self) -> usize {
        self.domains.len()
    }

    pub fn get_domains(&self) -> impl Iterator<Item = DomainId> + '_ {
        self.domains.keys()
    }

    pub fn get_domain(&self, domain_id: DomainId) -> &Domain {
        &self.domains[domain_id]
    }

    pub fn is_fixed(&self, domain_id: DomainId) -> bool {
        self.domains[domain_id].is_fixed()
    }

    pub fn get_checkpoint(&self) -> usize {
        self.trail.get_checkpoint()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.trail.new_checkpoint();
    }

    /// Restores every domain to the state it had at `new_checkpoint`. Pending events are dropped
    /// since they describe changes which no longer exist.
    pub(crate) fn synchronise(&mut self, new_checkpoint: usize) {
        // A domain changed at several checkpoints has one snapshot per checkpoint; the oldest one
        // is undone last and holds the state to return to.
        for snapshot in self.trail.synchronise(new_checkpoint) {
            self.domains[snapshot.domain_id] = snapshot.domain;
            self.last_recorded[snapshot.domain_id] = snapshot.last_recorded;
        }

        self.events.clear();
    }

    /// A copy of the current domains without the trail, e.g. to keep as a solution.
    pub(crate) fn without_history(&self) -> Assignments {
        let mut copy = Assignments::default();
        for domain in self.domains.iter() {
            let _ = copy.grow(domain.clone());
        }
        copy
    }

    pub(crate) fn drain_domain_events(&mut self) -> Drain<'_, (DomainEvent, DomainId)> {
        self.events.drain(..)
    }

    /// Applies `operation` to the domain of `domain_id`, recording the domain on the trail if this
    /// is the first change since the last checkpoint. Returns whether the domain changed.
    fn modify(
        &mut self,
        domain_id: DomainId,
        operation: impl FnOnce(&mut Domain) -> Result<DomainChange, EmptyDomain>,
    ) -> Result<bool, EmptyDomain> {
        let checkpoint = self.trail.get_checkpoint();
        let snapshot =
            (self.last_recorded[domain_id] < checkpoint).then(|| self.domains[domain_id].clone());

        let change = operation(&mut self.domains[domain_id])?;
        if change.is_empty() {
            return Ok(false);
        }

        if let Some(domain) = snapshot {
            self.trail.push(DomainSnapshot {
                domain_id,
                domain,
                last_recorded: self.last_recorded[domain_id],
            });
            self.last_recorded[domain_id] = checkpoint;
        }

        self.events
            .extend(change.iter().map(|event| (event, domain_id)));

        Ok(true)
    }
}

// Integer domains.
impl Assignments {
    pub fn get_integer_domain(&self, domain_id: DomainId) -> &IntegerDomain {
        match &self.domains[domain_id] {
            Domain::Integer(domain) => domain,
            _ => panic!("{domain_id} is not an integer variable"),
        }
    }

    pub fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.get_integer_domain(domain_id).min()
    }

    pub fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.get_integer_domain(domain_id).max()
    }

    pub fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.get_integer_domain(domain_id).contains(value)
    }

    pub fn get_domain_size(&self, domain_id: DomainId) -> u64 {
        self.get_integer_domain(domain_id).cardinality()
    }

    pub fn get_domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        self.get_integer_domain(domain_id).values()
    }

    pub fn is_domain_assigned(&self, domain_id: DomainId) -> bool {
        self.get_integer_domain(domain_id).is_singleton()
    }

    pub fn get_assigned_value(&self, domain_id: DomainId) -> Option<i32> {
        let domain = self.get_integer_domain(domain_id);
        domain.is_singleton().then(|| domain.min())
    }

    fn modify_integer(
        &mut self,
        domain_id: DomainId,
        operation: impl FnOnce(&mut IntegerDomain) -> Result<DomainChange, EmptyDomain>,
    ) -> Result<bool, EmptyDomain> {
        self.modify(domain_id, |domain| match domain {
            Domain::Integer(domain) => operation(domain),
            _ => panic!("{domain_id} is not an integer variable"),
        })
    }

    pub fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<bool, EmptyDomain> {
        self.modify_integer(domain_id, |domain| domain.set_min(new_lower_bound))
    }

    pub fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<bool, EmptyDomain> {
        self.modify_integer(domain_id, |domain| domain.set_max(new_upper_bound))
    }

    pub fn make_assignment(&mut self, domain_id: DomainId, value: i32) -> Result<bool, EmptyDomain> {
        self.modify_integer(domain_id, |domain| domain.set_value(value))
    }

    pub fn remove_value_from_domain(
        &mut self,
        domain_id: DomainId,
        value: i32,
    ) -> Result<bool, EmptyDomain> {
        self.modify_integer(domain_id, |domain| domain.remove_value(value))
    }

    /// Removes every value which is not in `values`.
    pub fn intersect_domain(
        &mut self,
        domain_id: DomainId,
        values: &IntervalDomain,
    ) -> Result<bool, EmptyDomain> {
        self.modify_integer(domain_id, |domain| domain.intersect_with(values))
    }
}

// Set domains.
impl Assignments {
    pub fn get_set_domain(&self, set: SetVariable) -> &SetDomain {
        match &self.domains[set.domain_id()] {
            Domain::Set(domain) => domain,
            _ => panic!("{set} is not a set variable"),
        }
    }

    fn modify_set(
        &mut self,
        set: SetVariable,
        operation: impl FnOnce(&mut SetDomain) -> Result<DomainChange, EmptyDomain>,
    ) -> Result<bool, EmptyDomain> {
        self.modify(set.domain_id(), |domain| match domain {
            Domain::Set(domain) => operation(domain),
            _ => panic!("{set} is not a set variable"),
        })
    }

    pub fn include_in_set(&mut self, set: SetVariable, value: i32) -> Result<bool, EmptyDomain> {
        self.modify_set(set, |domain| domain.include(value))
    }

    pub fn exclude_from_set(&mut self, set: SetVariable, value: i32) -> Result<bool, EmptyDomain> {
        self.modify_set(set, |domain| domain.exclude(value))
    }

    pub fn include_all_in_set(
        &mut self,
        set: SetVariable,
        values: &IntervalDomain,
    ) -> Result<bool, EmptyDomain> {
        self.modify_set(set, |domain| domain.include_all(values))
    }

    pub fn exclude_all_from_set(
        &mut self,
        set: SetVariable,
        values: &IntervalDomain,
    ) -> Result<bool, EmptyDomain> {
        self.modify_set(set, |domain| domain.exclude_all(values))
    }

    /// Removes every element not in `values` from the lub of `set`.
    pub fn restrict_set(
        &mut self,
        set: SetVariable,
        values: &IntervalDomain,
    ) -> Result<bool, EmptyDomain> {
        self.modify_set(set, |domain| domain.restrict_to(values))
    }

    pub fn collapse_set_to_glb(&mut self, set: SetVariable) -> Result<bool, EmptyDomain> {
        self.modify_set(set, |domain| Ok(domain.collapse_to_glb()))
    }

    pub fn collapse_set_to_lub(&mut self, set: SetVariable) -> Result<bool, EmptyDomain> {
        self.modify_set(set, |domain| Ok(domain.collapse_to_lub()))
    }
}

// Real domains.
impl Assignments {
    pub fn get_real_domain(&self, real: RealVariable) -> &RealDomain {
        match &self.domains[real.domain_id()] {
            Domain::Real(domain) => domain,
            _ => panic!("{real} is not a real variable"),
        }
    }

    fn modify_real(
        &mut self,
        real: RealVariable,
        operation: impl FnOnce(&mut RealDomain) -> Result<DomainChange, EmptyDomain>,
    ) -> Result<bool, EmptyDomain> {
        self.modify(real.domain_id(), |domain| match domain {
            Domain::Real(domain) => operation(domain),
            _ => panic!("{real} is not a real variable"),
        })
    }

    pub fn tighten_real_lower_bound(
        &mut self,
        real: RealVariable,
        value: f64,
    ) -> Result<bool, EmptyDomain> {
        self.modify_real(real, |domain| domain.set_min(value))
    }

    pub fn tighten_real_upper_bound(
        &mut self,
        real: RealVariable,
        value: f64,
    ) -> Result<bool, EmptyDomain> {
        self.modify_real(real, |domain| domain.set_max(value))
    }
}

// Predicates.
impl Assignments {
    /// Makes `predicate` true, returning whether any domain changed.
    pub fn post_predicate(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => self.tighten_lower_bound(domain_id, lower_bound),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => self.tighten_upper_bound(domain_id, upper_bound),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => self.remove_value_from_domain(domain_id, not_equal_constant),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => self.make_assignment(domain_id, equality_constant),
            Predicate::Contains { set, element } => self.include_in_set(set, element),
            Predicate::Excludes { set, element } => self.exclude_from_set(set, element),
            Predicate::RealLowerBound { real, lower_bound } => {
                self.tighten_real_lower_bound(real, lower_bound)
            }
            Predicate::RealUpperBound { real, upper_bound } => {
                self.tighten_real_upper_bound(real, upper_bound)
            }
            Predicate::True => Ok(false),
            Predicate::False => Err(EmptyDomain),
        }
    }

    /// Returns `Some(truth value)` if the predicate is decided by the current domains, and `None`
    /// otherwise.
    pub fn evaluate_predicate(&self, predicate: Predicate) -> Option<bool> {
        let decided = |is_true: bool, is_false: bool| {
            if is_true {
                Some(true)
            } else if is_false {
                Some(false)
            } else {
                None
            }
        };

        match predicate {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => decided(
                self.get_lower_bound(domain_id) >= lower_bound,
                self.get_upper_bound(domain_id) < lower_bound,
            ),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => decided(
                self.get_upper_bound(domain_id) <= upper_bound,
                self.get_lower_bound(domain_id) > upper_bound,
            ),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => decided(
                !self.is_value_in_domain(domain_id, not_equal_constant),
                self.get_assigned_value(domain_id) == Some(not_equal_constant),
            ),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => decided(
                self.get_assigned_value(domain_id) == Some(equality_constant),
                !self.is_value_in_domain(domain_id, equality_constant),
            ),
            Predicate::Contains { set, element } => {
                let domain = self.get_set_domain(set);
                decided(
                    domain.glb().contains_value(element),
                    !domain.lub().contains_value(element),
                )
            }
            Predicate::Excludes { set, element } => {
                let domain = self.get_set_domain(set);
                decided(
                    !domain.lub().contains_value(element),
                    domain.glb().contains_value(element),
                )
            }
            Predicate::RealLowerBound { real, lower_bound } => {
                let domain = self.get_real_domain(real);
                decided(
                    domain.min() >= lower_bound - domain.precision(),
                    domain.max() < lower_bound - domain.precision(),
                )
            }
            Predicate::RealUpperBound { real, upper_bound } => {
                let domain = self.get_real_domain(real);
                decided(
                    domain.max() <= upper_bound + domain.precision(),
                    domain.min() > upper_bound + domain.precision(),
                )
            }
            Predicate::True => Some(true),
            Predicate::False => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::BitSetDomain;
    use crate::predicate;

    fn interval(assignments: &mut Assignments, lower_bound: i32, upper_bound: i32) -> DomainId {
        assignments.grow(Domain::Integer(IntegerDomain::Interval(IntervalDomain::new(
            lower_bound,
            upper_bound,
        ))))
    }

    #[test]
    fn synchronise_restores_the_domain_of_the_checkpoint() {
        let mut assignments = Assignments::default();
        let x = interval(&mut assignments, 0, 10);

        let _ = assignments.tighten_lower_bound(x, 2).expect("non-empty");
        assignments.new_checkpoint();
        let _ = assignments.tighten_lower_bound(x, 5).expect("non-empty");
        let _ = assignments.remove_value_from_domain(x, 7).expect("non-empty");
        assignments.new_checkpoint();
        let _ = assignments.make_assignment(x, 9).expect("non-empty");

        assert_eq!(Some(9), assignments.get_assigned_value(x));

        assignments.synchronise(1);
        assert_eq!(5, assignments.get_lower_bound(x));
        assert!(!assignments.is_value_in_domain(x, 7));

        assignments.synchronise(0);
        assert_eq!(2, assignments.get_lower_bound(x));
        assert_eq!(9, assignments.get_domain_size(x));
    }

    #[test]
    fn a_domain_changed_at_several_checkpoints_is_restored_to_the_root() {
        let mut assignments = Assignments::default();
        let x = interval(&mut assignments, 0, 10);

        assignments.new_checkpoint();
        let _ = assignments.tighten_lower_bound(x, 2).expect("non-empty");
        assignments.new_checkpoint();
        let _ = assignments.tighten_lower_bound(x, 5).expect("non-empty");
        assignments.new_checkpoint();
        let _ = assignments.tighten_upper_bound(x, 8).expect("non-empty");

        assignments.synchronise(1);
        assert_eq!(2, assignments.get_lower_bound(x));
        assert_eq!(10, assignments.get_upper_bound(x));

        assignments.new_checkpoint();
        let _ = assignments.tighten_lower_bound(x, 6).expect("non-empty");

        assignments.synchronise(0);
        assert_eq!(0, assignments.get_checkpoint());
        assert_eq!(0, assignments.get_lower_bound(x));
        assert_eq!(10, assignments.get_upper_bound(x));
        assert!(assignments.trail.is_empty());
    }

    #[test]
    fn unchanged_domains_are_not_recorded() {
        let mut assignments = Assignments::default();
        let x = interval(&mut assignments, 0, 10);

        assignments.new_checkpoint();
        assert!(!assignments.tighten_lower_bound(x, -5).expect("non-empty"));

        assert!(assignments.trail.is_empty());
    }

    #[test]
    fn failed_operations_leave_the_domain_untouched() {
        let mut assignments = Assignments::default();
        let x = interval(&mut assignments, 0, 10);

        assignments.new_checkpoint();
        assert_eq!(Err(EmptyDomain), assignments.tighten_lower_bound(x, 11));

        assert_eq!(0, assignments.get_lower_bound(x));
        assert_eq!(10, assignments.get_upper_bound(x));
    }

    #[test]
    fn events_are_reported_per_change() {
        let mut assignments = Assignments::default();
        let x = assignments.grow(Domain::Integer(IntegerDomain::BitSet(BitSetDomain::new(
            0, 3,
        ))));

        let _ = assignments.remove_value_from_domain(x, 2).expect("non-empty");
        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert_eq!(vec![(DomainEvent::Removal, x)], events);

        let _ = assignments.tighten_upper_bound(x, 1).expect("non-empty");
        let events = assignments.drain_domain_events().collect::<Vec<_>>();
        assert!(events.contains(&(DomainEvent::UpperBound, x)));
    }

    #[test]
    fn predicates_are_evaluated_against_the_domains() {
        let mut assignments = Assignments::default();
        let x = interval(&mut assignments, 0, 10);

        assert_eq!(None, assignments.evaluate_predicate(predicate![x >= 3]));

        let _ = assignments.post_predicate(predicate![x >= 3]).expect("non-empty");
        assert_eq!(Some(true), assignments.evaluate_predicate(predicate![x >= 3]));
        assert_eq!(Some(false), assignments.evaluate_predicate(predicate![x <= 2]));
        assert_eq!(Some(false), assignments.evaluate_predicate(predicate![x == 1]));
    }

    #[test]
    fn set_domains_are_restored() {
        let mut assignments = Assignments::default();
        let set = SetVariable::new(assignments.grow(Domain::Set(SetDomain::new(
            IntervalDomain::empty(),
            IntervalDomain::new(1, 3),
        ))));

        assignments.new_checkpoint();
        let _ = assignments.include_in_set(set, 2).expect("in lub");
        let _ = assignments.exclude_from_set(set, 3).expect("not in glb");
        assignments.synchronise(0);

        assert!(assignments.get_set_domain(set).glb().is_empty());
        assert_eq!(3, assignments.get_set_domain(set).lub().len());
    }
}
