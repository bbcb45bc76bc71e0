use itertools::Either;

use super::BitSetDomain;
use super::DomainChange;
use super::EmptyDomain;
use super::IntervalDomain;

/// The narrowing operations shared by all integer domain representations.
///
/// The bound accessors panic on an empty domain; a variable domain is never empty since every
/// operation that would empty it fails instead.
pub trait FiniteDomain {
    fn cardinality(&self) -> u64;

    fn min(&self) -> i32;

    fn max(&self) -> i32;

    fn contains(&self, value: i32) -> bool;

    /// Removes all values in `[lower, upper]`.
    fn remove_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain>;

    /// Removes all values outside `[lower, upper]`.
    fn retain_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain>;

    /// Removes all values not in `other`.
    fn intersect_with(&mut self, other: &IntervalDomain) -> Result<DomainChange, EmptyDomain>;

    fn to_interval_domain(&self) -> IntervalDomain;

    fn is_empty(&self) -> bool {
        self.cardinality() == 0
    }

    fn is_singleton(&self) -> bool {
        self.cardinality() == 1
    }

    fn remove_value(&mut self, value: i32) -> Result<DomainChange, EmptyDomain> {
        self.remove_range(value, value)
    }

    fn set_min(&mut self, value: i32) -> Result<DomainChange, EmptyDomain> {
        if value <= self.min() {
            return Ok(DomainChange::empty());
        }
        self.retain_range(value, i32::MAX)
    }

    fn set_max(&mut self, value: i32) -> Result<DomainChange, EmptyDomain> {
        if value >= self.max() {
            return Ok(DomainChange::empty());
        }
        self.retain_range(i32::MIN, value)
    }

    fn set_value(&mut self, value: i32) -> Result<DomainChange, EmptyDomain> {
        self.retain_range(value, value)
    }
}

/// The domain of an integer variable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IntegerDomain {
    Interval(IntervalDomain),
    BitSet(BitSetDomain),
}

impl IntegerDomain {
    /// Iterates the remaining values in increasing order. Every call starts a fresh iteration.
    pub fn values(&self) -> impl Iterator<Item = i32> + '_ {
        match self {
            IntegerDomain::Interval(domain) => Either::Left(domain.values()),
            IntegerDomain::BitSet(domain) => Either::Right(domain.values()),
        }
    }
}

impl FiniteDomain for IntegerDomain {
    fn cardinality(&self) -> u64 {
        match self {
            IntegerDomain::Interval(domain) => domain.cardinality(),
            IntegerDomain::BitSet(domain) => domain.cardinality(),
        }
    }

    fn min(&self) -> i32 {
        match self {
            IntegerDomain::Interval(domain) => domain.min(),
            IntegerDomain::BitSet(domain) => domain.min(),
        }
    }

    fn max(&self) -> i32 {
        match self {
            IntegerDomain::Interval(domain) => domain.max(),
            IntegerDomain::BitSet(domain) => domain.max(),
        }
    }

    fn contains(&self, value: i32) -> bool {
        match self {
            IntegerDomain::Interval(domain) => domain.contains(value),
            IntegerDomain::BitSet(domain) => domain.contains(value),
        }
    }

    fn remove_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain> {
        match self {
            IntegerDomain::Interval(domain) => domain.remove_range(lower, upper),
            IntegerDomain::BitSet(domain) => domain.remove_range(lower, upper),
        }
    }

    fn retain_range(&mut self, lower: i32, upper: i32) -> Result<DomainChange, EmptyDomain> {
        match self {
            IntegerDomain::Interval(domain) => domain.retain_range(lower, upper),
            IntegerDomain::BitSet(domain) => domain.retain_range(lower, upper),
        }
    }

    fn intersect_with(&mut self, other: &IntervalDomain) -> Result<DomainChange, EmptyDomain> {
        match self {
            IntegerDomain::Interval(domain) => domain.intersect_with(other),
            IntegerDomain::BitSet(domain) => domain.intersect_with(other),
        }
    }

    fn to_interval_domain(&self) -> IntervalDomain {
        match self {
            IntegerDomain::Interval(domain) => domain.clone(),
            IntegerDomain::BitSet(domain) => domain.to_interval_domain(),
        }
    }
}
