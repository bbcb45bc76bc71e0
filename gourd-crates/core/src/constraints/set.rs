use super::Constraint;
use crate::propagators::set::DisjointPropagatorArgs;
use crate::propagators::set::IntersectionPropagatorArgs;
use crate::propagators::set::LexLessOrEqualPropagatorArgs;
use crate::propagators::set::SetCardinalityPropagatorArgs;
use crate::propagators::set::SetEqualityPropagatorArgs;
use crate::propagators::set::SubsetPropagatorArgs;
use crate::propagators::set::UnionPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::variables::SetVariable;
use crate::DeclarationError;
use crate::Solver;

struct SetCardinalityConstraint<Var> {
    set: SetVariable,
    cardinality: Var,
}

/// Creates the [`Constraint`] `|set| = cardinality`.
///
/// Posting fails with [`DeclarationError::InvalidCardinalityBounds`] if `cardinality` cannot take
/// any value between the sizes of the lower and the upper bound of `set`.
pub fn set_cardinality<Var: IntegerVariable + 'static>(
    set: SetVariable,
    cardinality: Var,
) -> impl Constraint {
    SetCardinalityConstraint { set, cardinality }
}

impl<Var: IntegerVariable + 'static> Constraint for SetCardinalityConstraint<Var> {
    fn post(self, solver: &mut Solver) -> Result<(), DeclarationError> {
        let lower = solver.lower_bound(&self.cardinality) as i64;
        let upper = solver.upper_bound(&self.cardinality) as i64;
        let min_size = solver.glb(self.set).len() as i64;
        let max_size = solver.lub(self.set).len() as i64;
        if upper < min_size || lower > max_size {
            return Err(DeclarationError::InvalidCardinalityBounds { lower, upper });
        }

        let _ = solver.add_propagator(SetCardinalityPropagatorArgs {
            set: self.set,
            cardinality: self.cardinality,
        })?;
        Ok(())
    }
}

/// Creates the [`Constraint`] `subset ⊆ superset`.
pub fn subset(subset: SetVariable, superset: SetVariable) -> impl Constraint {
    SubsetPropagatorArgs { subset, superset }
}

/// Creates the [`Constraint`] `x = y` over sets.
pub fn set_equals(x: SetVariable, y: SetVariable) -> impl Constraint {
    SetEqualityPropagatorArgs { x, y }
}

/// Creates the [`Constraint`] `x ∩ y = intersection`.
pub fn intersection(x: SetVariable, y: SetVariable, intersection: SetVariable) -> impl Constraint {
    IntersectionPropagatorArgs { x, y, intersection }
}

/// Creates the [`Constraint`] `x ∪ y = union`.
pub fn union(x: SetVariable, y: SetVariable, union: SetVariable) -> impl Constraint {
    UnionPropagatorArgs { x, y, union }
}

/// Creates the [`Constraint`] `x ∩ y = {}`.
pub fn disjoint(x: SetVariable, y: SetVariable) -> impl Constraint {
    DisjointPropagatorArgs { x, y }
}

/// Creates the [`Constraint`] that `smaller` is lexicographically at most `larger`, comparing
/// the sets as their ascending sequences of elements.
///
/// A set is smaller than every proper extension of it, so `{1} < {1, 2} < {2}`.
pub fn lex_less_than_or_equals(smaller: SetVariable, larger: SetVariable) -> impl Constraint {
    LexLessOrEqualPropagatorArgs { smaller, larger }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::IntervalDomain;
    use crate::predicate;

    #[test]
    fn a_cardinality_outside_the_bounds_of_the_set_is_malformed() {
        let mut solver = Solver::default();
        let set = solver
            .new_set_variable([], 1..=3)
            .expect("valid");
        let cardinality = solver.new_bounded_integer(4, 6).expect("non-empty");

        let result = solver.add_constraint(set_cardinality(set, cardinality));
        assert_eq!(
            result,
            Err(DeclarationError::InvalidCardinalityBounds { lower: 4, upper: 6 })
        );
    }

    #[test]
    fn an_element_outside_the_superset_cannot_be_required() {
        let mut solver = Solver::default();
        let x = solver
            .new_set_variable([], 1..=3)
            .expect("valid");
        let y = solver
            .new_set_variable([], 2..=4)
            .expect("valid");

        solver.add_constraint(subset(x, y)).expect("feasible");
        assert_eq!(solver.lub(x), &IntervalDomain::new(2, 3));

        let result = solver.post(predicate![x contains 1]);
        assert_eq!(result, Err(DeclarationError::InfeasibleConstraint));
    }
}
