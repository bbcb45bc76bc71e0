use super::Predicate;
use crate::engine::variables::DomainId;

/// Integer-valued things which atomic [`Predicate`]s can be stated over.
///
/// Views implement this by translating the bound back to the underlying domain, so the resulting
/// predicate always refers to a [`DomainId`].
pub trait PredicateConstructor {
    type Value;

    /// `[self >= bound]`
    fn lower_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// `[self <= bound]`
    fn upper_bound_predicate(&self, bound: Self::Value) -> Predicate;

    /// `[self == value]`
    fn equality_predicate(&self, value: Self::Value) -> Predicate;

    /// `[self != value]`
    fn disequality_predicate(&self, value: Self::Value) -> Predicate;
}

impl PredicateConstructor for DomainId {
    type Value = i32;

    fn lower_bound_predicate(&self, lower_bound: i32) -> Predicate {
        let domain_id = *self;
        Predicate::LowerBound {
            domain_id,
            lower_bound,
        }
    }

    fn upper_bound_predicate(&self, upper_bound: i32) -> Predicate {
        let domain_id = *self;
        Predicate::UpperBound {
            domain_id,
            upper_bound,
        }
    }

    fn equality_predicate(&self, equality_constant: i32) -> Predicate {
        let domain_id = *self;
        Predicate::Equal {
            domain_id,
            equality_constant,
        }
    }

    fn disequality_predicate(&self, not_equal_constant: i32) -> Predicate {
        let domain_id = *self;
        Predicate::NotEqual {
            domain_id,
            not_equal_constant,
        }
    }
}

/// Builds a [`Predicate`] from a comparison written in infix form.
///
/// The left-hand side is an identifier, a field path or an indexed element. Integer variables and
/// their views accept `>=`, `<=`, `==` and `!=`; real variables accept `>=` and `<=`; set variables
/// accept `contains` and `excludes`.
///
/// # Example
/// ```rust
/// # use gourd_core::Solver;
/// # use gourd_core::predicate;
/// # use gourd_core::predicates::Predicate;
/// let mut solver = Solver::default();
/// let x = solver.new_bounded_integer(0, 10).unwrap();
/// let set = solver.new_set_variable([], [1, 2, 3]).unwrap();
///
/// assert_eq!(
///     predicate!(x >= 5),
///     Predicate::LowerBound {
///         domain_id: x,
///         lower_bound: 5
///     }
/// );
/// assert_eq!(
///     predicate!(set contains 2),
///     Predicate::Contains {
///         set,
///         element: 2
///     }
/// );
/// ```
#[macro_export]
macro_rules! predicate {
    (@build $method:ident, $target:expr, $value:expr) => {{
        #[allow(unused_imports, reason = "set and real variables have inherent constructors")]
        use $crate::predicates::PredicateConstructor as _;
        $target.$method($value)
    }};
    ($($var:ident).+$([$index:expr])? >= $bound:expr) => {
        $crate::predicate!(@build lower_bound_predicate, $($var).+$([$index])?, $bound)
    };
    ($($var:ident).+$([$index:expr])? <= $bound:expr) => {
        $crate::predicate!(@build upper_bound_predicate, $($var).+$([$index])?, $bound)
    };
    ($($var:ident).+$([$index:expr])? == $value:expr) => {
        $crate::predicate!(@build equality_predicate, $($var).+$([$index])?, $value)
    };
    ($($var:ident).+$([$index:expr])? != $value:expr) => {
        $crate::predicate!(@build disequality_predicate, $($var).+$([$index])?, $value)
    };
    ($($var:ident).+$([$index:expr])? contains $value:expr) => {
        $crate::predicate!(@build contains_predicate, $($var).+$([$index])?, $value)
    };
    ($($var:ident).+$([$index:expr])? excludes $value:expr) => {
        $crate::predicate!(@build excludes_predicate, $($var).+$([$index])?, $value)
    };
}
