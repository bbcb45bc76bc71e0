//! Representations of the set of values a variable can still take.
//!
//! Integer variables are backed by an [`IntegerDomain`], which is either a list of disjoint
//! intervals ([`IntervalDomain`]) or a fixed-size bitset ([`BitSetDomain`]). Set variables are
//! backed by a [`SetDomain`], a pair of value sets bounding the set from below and above. Real
//! variables are backed by a [`RealDomain`], an interval compared using a configured precision.
//!
//! Every narrowing operation either
//! - leaves the domain untouched and reports an empty [`DomainChange`],
//! - narrows the domain and reports which [`DomainEvent`]s happened, or
//! - refuses to narrow the domain to the empty set and returns [`EmptyDomain`].
//!
//! A failed operation never modifies the domain.

mod bitset_domain;
mod integer_domain;
mod interval_domain;
mod real_domain;
mod set_domain;

use std::fmt::Display;

pub use bitset_domain::BitSetDomain;
use enum_map::Enum;
use enumset::EnumSet;
use enumset::EnumSetType;
pub use integer_domain::FiniteDomain;
pub use integer_domain::IntegerDomain;
pub use interval_domain::Interval;
pub use interval_domain::IntervalDomain;
pub use real_domain::RealDomain;
pub use set_domain::SetDomain;

/// A description of the kinds of events that can happen on a domain.
#[derive(Debug, EnumSetType, Enum, Hash)]
pub enum DomainEvent {
    /// The domain collapsed to a single value (for a set variable: the lower and upper bound
    /// became equal).
    Assign,
    /// The minimum of the domain increased.
    LowerBound,
    /// The maximum of the domain decreased.
    UpperBound,
    /// At least one value was removed from an integer domain. This fires together with the bound
    /// events when the removed value was an extremum.
    Removal,
    /// An element was added to the lower bound of a set domain.
    GlbChange,
    /// An element was removed from the upper bound of a set domain.
    LubChange,
}

impl Display for DomainEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainEvent::Assign => write!(f, "[Event:Assign]"),
            DomainEvent::LowerBound => write!(f, "[Event:LB]"),
            DomainEvent::UpperBound => write!(f, "[Event:UB]"),
            DomainEvent::Removal => write!(f, "[Event:Remove]"),
            DomainEvent::GlbChange => write!(f, "[Event:Glb]"),
            DomainEvent::LubChange => write!(f, "[Event:Lub]"),
        }
    }
}

/// The events that fired due to one domain operation. An empty set means the operation did not
/// narrow the domain.
pub type DomainChange = EnumSet<DomainEvent>;

/// Returned when a domain operation would remove every remaining value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmptyDomain;

/// The domain of a single variable of any kind.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    Integer(IntegerDomain),
    Set(SetDomain),
    Real(RealDomain),
}

impl Domain {
    /// Whether the variable owning this domain has a single remaining value.
    pub fn is_fixed(&self) -> bool {
        match self {
            Domain::Integer(domain) => domain.is_singleton(),
            Domain::Set(domain) => domain.is_bound(),
            Domain::Real(domain) => domain.is_singleton(),
        }
    }

    /// A size measure used by the search heuristics: the number of values for integer domains,
    /// the number of undecided elements plus one for set domains, and the number of
    /// precision-sized steps for real domains.
    pub fn size(&self) -> u64 {
        match self {
            Domain::Integer(domain) => domain.cardinality(),
            Domain::Set(domain) => domain.num_undecided() + 1,
            Domain::Real(domain) => domain.num_steps(),
        }
    }
}

/// Computes the events caused by narrowing an integer domain from the `before` state to the
/// `after` state, both given as `(min, max, cardinality)`.
pub(crate) fn integer_change(before: (i32, i32, u64), after: (i32, i32, u64)) -> DomainChange {
    let mut change = DomainChange::empty();

    if before.2 == after.2 {
        return change;
    }

    let _ = change.insert(DomainEvent::Removal);
    if after.0 != before.0 {
        let _ = change.insert(DomainEvent::LowerBound);
    }
    if after.1 != before.1 {
        let _ = change.insert(DomainEvent::UpperBound);
    }
    if after.2 == 1 {
        let _ = change.insert(DomainEvent::Assign);
    }

    change
}

#[cfg(test)]
mod tests {
    use enumset::enum_set;

    use super::*;

    #[test]
    fn interior_removal_is_only_a_removal() {
        let change = integer_change((1, 5, 5), (1, 5, 4));

        assert_eq!(enum_set!(DomainEvent::Removal), change);
    }

    #[test]
    fn removal_of_the_minimum_is_a_lower_bound_event() {
        let change = integer_change((1, 5, 5), (2, 5, 4));

        assert_eq!(
            DomainEvent::Removal | DomainEvent::LowerBound,
            change
        );
    }

    #[test]
    fn removal_of_the_last_but_one_value_is_an_assignment() {
        let change = integer_change((1, 2, 2), (1, 1, 1));

        assert_eq!(
            DomainEvent::Removal | DomainEvent::UpperBound | DomainEvent::Assign,
            change
        );
    }

    #[test]
    fn no_change_when_cardinality_is_equal() {
        assert!(integer_change((1, 2, 2), (1, 2, 2)).is_empty());
    }
}
