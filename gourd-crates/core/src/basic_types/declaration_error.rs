use thiserror::Error;

#[cfg(doc)]
use crate::Solver;

/// Errors related to declaring variables and constraints on the [`Solver`].
///
/// These are always reported to the caller; the solver never tries to recover from a malformed
/// model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeclarationError {
    /// Two arrays which should be of equal length are not.
    #[error("array lengths must match: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// A value which should be in the domain of a variable is not.
    #[error("value {value} must lie in the variable's domain")]
    ValueOutsideDomain { value: i32 },
    /// The bounds of a cardinality are out of range or crossed.
    #[error("cardinality bounds [{lower}, {upper}] are invalid")]
    InvalidCardinalityBounds { lower: i64, upper: i64 },
    /// The variable would have been created with an empty domain.
    #[error("cannot create a variable with an empty domain")]
    EmptyDomain,
    /// A bitset domain would span more values than [`Solver::MAX_BITSET_DOMAIN_SIZE`].
    ///
    /// [`Solver::MAX_BITSET_DOMAIN_SIZE`]: crate::Solver::MAX_BITSET_DOMAIN_SIZE
    #[error("a bitset domain of {size} values exceeds the limit of {limit}")]
    DomainTooLarge { size: u64, limit: u64 },
    /// The automaton description is malformed.
    #[error("invalid automaton: {0}")]
    InvalidAutomaton(String),
    /// The precision of real variables must be positive and finite.
    #[error("the precision of real variables must be positive and finite")]
    InvalidPrecision,
    /// The solver was already found to be infeasible, so nothing can be added to it.
    #[error("declaration failed because the solver is in an infeasible state")]
    InfeasibleState,
    /// Adding the constraint led to infeasibility at the root.
    #[error("declaration failed because the constraint is infeasible at the root")]
    InfeasibleConstraint,
}
