use std::fmt::Display;
use std::ops::Not;

use crate::engine::variables::DomainId;
use crate::engine::variables::RealVariable;
use crate::engine::variables::SetVariable;

/// An atomic statement about the domain of a single variable.
///
/// Predicates are the decisions taken during search and the facts posted at the root, e.g. the
/// tightened objective bound during branch-and-bound.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Predicate {
    LowerBound {
        domain_id: DomainId,
        lower_bound: i32,
    },
    UpperBound {
        domain_id: DomainId,
        upper_bound: i32,
    },
    NotEqual {
        domain_id: DomainId,
        not_equal_constant: i32,
    },
    Equal {
        domain_id: DomainId,
        equality_constant: i32,
    },
    Contains {
        set: SetVariable,
        element: i32,
    },
    Excludes {
        set: SetVariable,
        element: i32,
    },
    RealLowerBound {
        real: RealVariable,
        lower_bound: f64,
    },
    RealUpperBound {
        real: RealVariable,
        upper_bound: f64,
    },
    /// Holds in every state.
    True,
    /// Holds in no state.
    False,
}

impl Predicate {
    /// Returns the [`DomainId`] the predicate is about, or `None` for the constant predicates.
    pub fn get_domain(&self) -> Option<DomainId> {
        match *self {
            Predicate::LowerBound { domain_id, .. }
            | Predicate::UpperBound { domain_id, .. }
            | Predicate::NotEqual { domain_id, .. }
            | Predicate::Equal { domain_id, .. } => Some(domain_id),
            Predicate::Contains { set, .. } | Predicate::Excludes { set, .. } => {
                Some(set.domain_id())
            }
            Predicate::RealLowerBound { real, .. } | Predicate::RealUpperBound { real, .. } => {
                Some(real.domain_id())
            }
            Predicate::True | Predicate::False => None,
        }
    }

    pub fn is_equality_predicate(&self) -> bool {
        matches!(self, Predicate::Equal { .. })
    }

    pub fn is_lower_bound_predicate(&self) -> bool {
        matches!(
            self,
            Predicate::LowerBound { .. } | Predicate::RealLowerBound { .. }
        )
    }

    pub fn is_upper_bound_predicate(&self) -> bool {
        matches!(
            self,
            Predicate::UpperBound { .. } | Predicate::RealUpperBound { .. }
        )
    }
}

impl Not for Predicate {
    type Output = Predicate;

    /// The negation of a real bound is the opposite non-strict bound, which is exact up to the
    /// precision of the variable.
    fn not(self) -> Self::Output {
        match self {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => Predicate::UpperBound {
                domain_id,
                upper_bound: lower_bound - 1,
            },
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => Predicate::LowerBound {
                domain_id,
                lower_bound: upper_bound + 1,
            },
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => Predicate::Equal {
                domain_id,
                equality_constant: not_equal_constant,
            },
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => Predicate::NotEqual {
                domain_id,
                not_equal_constant: equality_constant,
            },
            Predicate::Contains { set, element } => Predicate::Excludes { set, element },
            Predicate::Excludes { set, element } => Predicate::Contains { set, element },
            Predicate::RealLowerBound { real, lower_bound } => Predicate::RealUpperBound {
                real,
                upper_bound: lower_bound,
            },
            Predicate::RealUpperBound { real, upper_bound } => Predicate::RealLowerBound {
                real,
                lower_bound: upper_bound,
            },
            Predicate::True => Predicate::False,
            Predicate::False => Predicate::True,
        }
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Predicate::LowerBound {
                domain_id,
                lower_bound,
            } => write!(f, "[{domain_id} >= {lower_bound}]"),
            Predicate::UpperBound {
                domain_id,
                upper_bound,
            } => write!(f, "[{domain_id} <= {upper_bound}]"),
            Predicate::NotEqual {
                domain_id,
                not_equal_constant,
            } => write!(f, "[{domain_id} != {not_equal_constant}]"),
            Predicate::Equal {
                domain_id,
                equality_constant,
            } => write!(f, "[{domain_id} == {equality_constant}]"),
            Predicate::Contains { set, element } => write!(f, "[{element} in {set}]"),
            Predicate::Excludes { set, element } => write!(f, "[{element} notin {set}]"),
            Predicate::RealLowerBound { real, lower_bound } => {
                write!(f, "[{real} >= {lower_bound}]")
            }
            Predicate::RealUpperBound { real, upper_bound } => {
                write!(f, "[{real} <= {upper_bound}]")
            }
            Predicate::True => write!(f, "[true]"),
            Predicate::False => write!(f, "[false]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn negation_of_bounds_is_exact() {
        let x = DomainId::new(0);

        assert_eq!(predicate![x <= 4], !predicate![x >= 5]);
        assert_eq!(predicate![x >= 5], !predicate![x <= 4]);
        assert_eq!(predicate![x != 5], !predicate![x == 5]);
    }

    #[test]
    fn double_negation_is_identity() {
        let set = SetVariable::new(DomainId::new(1));
        let predicate = predicate![set contains 3];

        assert_eq!(predicate, !!predicate);
        assert_eq!(predicate![set excludes 3], !predicate);
    }

    #[test]
    fn display_uses_the_variable_names() {
        let x = DomainId::new(2);

        assert_eq!("[x2 >= 1]", predicate![x >= 1].to_string());
    }
}
