use std::fmt::Display;

use super::integer_change;
use super::integer_domain::FiniteDomain;
use super::DomainChange;
use super::EmptyDomain;

/// An inclusive range of integers `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Interval {
    pub min: i32,
    pub max: i32,
}

impl Interval {
    pub fn new(min: i32, max: i32) -> Interval {
        Interval { min, max }
    }

    pub fn num_values(&self) -> u64 {
        (self.max as i64 - self.min as i64 + 1) as u64
    }

    pub fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..{}", self.min, self.max)
        }
    }
}

/// A finite set of integers stored as a sorted list of disjoint, non-adjacent intervals.
///
/// The type doubles as a plain value set (e.g. the bounds of a set variable), for which the
/// algebraic operations such as [`IntervalDomain::union`] and [`IntervalDomain::insert`] are
/// provided, and as the domain of an integer variable, for which only the narrowing operations
/// of [`FiniteDomain`] are used.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IntervalDomain {
    intervals: Vec<Interval>,
    size: u64,
}

impl IntervalDomain {
    /// Creates the set `[lower_bound, upper_bound]`, which is empty if `lower_bound >
    /// upper_bound`.
    pub fn new(lower_bound: i32, upper_bound: i32) -> IntervalDomain {
        if lower_bound > upper_bound {
            return IntervalDomain::empty();
        }

        let interval = Interval::new(lower_bound, upper_bound);
        IntervalDomain {
            size: interval.num_values(),
            intervals: vec![interval],
        }
    }

    pub fn empty() -> IntervalDomain {
        IntervalDomain::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = i32>) -> IntervalDomain {
        IntervalDomain::from_intervals(values.into_iter().map(|value| Interval::new(value, value)))
    }

    /// Creates a domain from arbitrary (possibly overlapping and unsorted) intervals.
    pub fn from_intervals(intervals: impl IntoIterator<Item = Interval>) -> IntervalDomain {
        let mut intervals = intervals
            .into_iter()
            .filter(|interval| interval.min <= interval.max)
            .collect::<Vec<_>>();
        intervals.sort_unstable_by_key(|interval| interval.min);

        let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
        for interval in intervals {
            match merged.last_mut() {
                Some(last) if interval.min as i64 <= last.max as i64 + 1 => {
                    last.max = last.max.max(interval.max);
                }
                _ => merged.push(interval),
            }
        }

        IntervalDomain::from_normalised(merged)
    }

    fn from_normalised(intervals: Vec<Interval>) -> IntervalDomain {
        let size = intervals.iter().map(Interval::num_values).sum();
        IntervalDomain { intervals, size }
    }

    pub fn len(&self) -> u64 {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The smallest value, if any.
    pub fn first(&self) -> Option<i32> {
        self.intervals.first().map(|interval| interval.min)
    }

    /// The largest value, if any.
    pub fn last(&self) -> Option<i32> {
        self.intervals.last().map(|interval| interval.max)
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Iterates the values in increasing order.
    pub fn values(&self) -> impl DoubleEndedIterator<Item = i32> + '_ {
        self.intervals
            .iter()
            .flat_map(|interval| interval.min..=interval.max)
    }

    pub fn contains_value(&self, value: i32) -> bool {
        self.intervals
            .binary_search_by(|interval| {
                if interval.max < value {
                    std::cmp::Ordering::Less
                } else if interval.min > value {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn is_subset_of(&self, other: &IntervalDomain) -> bool {
        self.intersection(other).len() == self.len()
    }

    pub fn is_disjoint_from(&self, other: &IntervalDomain) -> bool {
        self.intersection(other).is_empty()
    }

    /// Adds a value, returning whether it was absent.
    pub fn insert(&mut self, value: i32) -> bool {
        if self.contains_value(value) {
            return false;
        }

        *self = self.union(&IntervalDomain::new(value, value));
        true
    }

    /// Removes a value, returning whether it was present.
    pub fn remove(&mut self, value: i32) -> bool {
        if !self.contains_value(value) {
            return false;
        }

        *self = self.difference(&IntervalDomain::new(value, value));
        true
    }

    pub fn union(&self, other: &IntervalDomain) -> IntervalDomain {
        IntervalDomain::from_intervals(
            self.intervals
                .iter()
                .chain(other.intervals.iter())
                .copied(),
        )
    }

    pub fn intersection(&self, other: &IntervalDomain) -> IntervalDomain {
        let mut result = Vec::new();
        let mut left = self.intervals.iter().peekable();
        let mut right = other.intervals.iter().peekable();

        while let (Some(a), Some(b)) = (left.peek(), right.peek()) {
            let min = a.min.max(b.min);
            let max = a.max.min(b.max);
            if min <= max {
                result.push(Interval::new(min, max));
            }

            if a.max < b.max {
                let _ = left.next();
            } else {
                let _ = right.next();
            }
        }

        IntervalDomain::from_normalised(result)
    }

    /// All 32-bit integers not in this set.
    pub fn complement(&self) -> IntervalDomain {
        let mut result = Vec::with_capacity(self.intervals.len() + 1);
        let mut next_start = i32::MIN as i64;

        for interval in &self.intervals {
            if (interval.min as i64) > next_start {
                result.push(Interval::new(next_start as i32, interval.min - 1));
            }
            next_start = interval.max as i64 + 1;
        }

        if next_start <= i32::MAX as i64 {
            result.push(Interval::new(next_start as i32, i32::MAX));
        }

        IntervalDomain::from_normalised(result)
    }

    pub fn difference(&self, other: &IntervalDomain) -> IntervalDomain {
        self.intersection(&other.complement())
    }

    /// Replaces the contents with `narrowed`, which must be a subset of the current values.
    fn narrow_to(&mut self, narrowed: IntervalDomain) -> Result<DomainChange, EmptyDomain> {
        if narrowed.is_empty() {
            return Err(EmptyDomain);
        }

        let before = (self.min(), self.max(), self.size);
        *self = narrowed;

        Ok(integer_change(before, (self.min(), self.max(), self.size)))
    }
}

impl FiniteDomain for IntervalDomain {
    fn cardinality(&self) -> u64 {
        self.size
    }

    /// Panics if the domain is empty.
    fn min(&self) -> i32 {
        self.intervals[0].min
    }

    /// Panics if the domain is empty.
    fn max(&self) -> i32 {
        self.intervals[self.intervals.len() - 1].max
    }

    fn contains(&self, value: i32) -> bool {
        self.contains_value(value)
    }

    fn remove_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain> {
        let narrowed = self.difference(&IntervalDomain::new(lower, upper));
        self.narrow_to(narrowed)
    }

    fn retain_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain> {
        let narrowed = self.intersection(&IntervalDomain::new(lower, upper));
        self.narrow_to(narrowed)
    }

    fn intersect_with(&mut self, other: &IntervalDomain) -> Result<DomainChange, EmptyDomain> {
        let narrowed = self.intersection(other);
        self.narrow_to(narrowed)
    }

    fn to_interval_domain(&self) -> IntervalDomain {
        self.clone()
    }
}

impl Display for IntervalDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (index, interval) in self.intervals.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{interval}")?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::domains::DomainEvent;

    #[test]
    fn from_values_merges_adjacent_values() {
        let domain = IntervalDomain::from_values([5, 1, 2, 3, 7, 6]);

        assert_eq!(
            &[Interval::new(1, 3), Interval::new(5, 7)],
            domain.intervals()
        );
        assert_eq!(6, domain.len());
    }

    #[test]
    fn contains_respects_holes() {
        let domain = IntervalDomain::from_values([1, 2, 5]);

        assert!(domain.contains_value(1));
        assert!(domain.contains_value(5));
        assert!(!domain.contains_value(3));
        assert!(!domain.contains_value(6));
    }

    #[test]
    fn removing_an_interior_value_splits_an_interval() {
        let mut domain = IntervalDomain::new(1, 5);

        let change = domain.remove_value(3).expect("non-empty");

        assert_eq!(DomainChange::only(DomainEvent::Removal), change);
        assert_eq!(
            &[Interval::new(1, 2), Interval::new(4, 5)],
            domain.intervals()
        );
    }

    #[test]
    fn removing_an_absent_value_is_not_a_change() {
        let mut domain = IntervalDomain::from_values([1, 3]);

        let change = domain.remove_value(2).expect("non-empty");

        assert!(change.is_empty());
    }

    #[test]
    fn removing_the_last_value_fails_without_modifying() {
        let mut domain = IntervalDomain::new(4, 4);

        assert_eq!(Err(EmptyDomain), domain.remove_value(4));
        assert_eq!(IntervalDomain::new(4, 4), domain);
    }

    #[test]
    fn set_min_skips_holes() {
        let mut domain = IntervalDomain::from_values([1, 2, 5, 6]);

        let change = domain.set_min(3).expect("non-empty");

        assert_eq!(5, domain.min());
        assert!(change.contains(DomainEvent::LowerBound));
        assert!(!change.contains(DomainEvent::UpperBound));
    }

    #[test]
    fn set_value_outside_domain_fails() {
        let mut domain = IntervalDomain::from_values([1, 3]);

        assert_eq!(Err(EmptyDomain), domain.set_value(2));
    }

    #[test]
    fn set_value_reports_assignment() {
        let mut domain = IntervalDomain::new(1, 10);

        let change = domain.set_value(4).expect("non-empty");

        assert!(change.contains(DomainEvent::Assign));
        assert!(domain.is_singleton());
    }

    #[test]
    fn intersection_and_union() {
        let a = IntervalDomain::from_values([1, 2, 3, 8]);
        let b = IntervalDomain::from_values([2, 3, 4, 8, 9]);

        assert_eq!(IntervalDomain::from_values([2, 3, 8]), a.intersection(&b));
        assert_eq!(
            IntervalDomain::from_values([1, 2, 3, 4, 8, 9]),
            a.union(&b)
        );
        assert_eq!(IntervalDomain::from_values([1]), a.difference(&b));
    }

    #[test]
    fn complement_of_complement_is_identity() {
        let domain = IntervalDomain::from_values([-3, 0, 1, 10]);

        assert_eq!(domain, domain.complement().complement());
        assert!(!domain.complement().contains_value(0));
        assert!(domain.complement().contains_value(i32::MIN));
        assert!(domain.complement().contains_value(i32::MAX));
    }

    #[test]
    fn complement_of_empty_is_everything() {
        let complement = IntervalDomain::empty().complement();

        assert_eq!(&[Interval::new(i32::MIN, i32::MAX)], complement.intervals());
        assert_eq!(1u64 << 32, complement.len());
    }

    #[test]
    fn insert_reports_presence() {
        let mut domain = IntervalDomain::from_values([1, 3]);

        assert!(domain.insert(2));
        assert!(!domain.insert(2));
        assert_eq!(&[Interval::new(1, 3)], domain.intervals());
    }

    #[test]
    fn values_iterate_in_order() {
        let domain = IntervalDomain::from_values([4, 1, 2]);

        assert_eq!(vec![1, 2, 4], domain.values().collect::<Vec<_>>());
        assert_eq!(vec![4, 2, 1], domain.values().rev().collect::<Vec<_>>());
    }
}
