use super::Constraint;
use crate::propagators::arithmetic::BinaryNotEqualsPropagatorArgs;
use crate::propagators::arithmetic::LinearLessOrEqualPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::variables::TransformableVariable;
use crate::DeclarationError;
use crate::Solver;

/// Create the [`Constraint`] `\sum terms_i <= rhs`.
pub fn less_than_or_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    LinearLessOrEqualPropagatorArgs {
        terms: terms.into(),
        rhs,
    }
}

/// Create the [`Constraint`] `\sum terms_i < rhs`.
pub fn less_than<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    less_than_or_equals(terms, rhs - 1)
}

/// Create the [`Constraint`] `\sum terms_i >= rhs`.
pub fn greater_than_or_equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    let negated = terms
        .into()
        .iter()
        .map(|var| var.scaled(-1))
        .collect::<Box<[_]>>();
    less_than_or_equals(negated, -rhs)
}

/// Create the [`Constraint`] `\sum terms_i > rhs`.
pub fn greater_than<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    greater_than_or_equals(terms, rhs + 1)
}

/// Create the [`Constraint`] `lhs <= rhs`.
pub fn binary_less_than_or_equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: Var,
) -> impl Constraint {
    less_than_or_equals([lhs.scaled(1), rhs.scaled(-1)], 0)
}

/// Create the [`Constraint`] `lhs < rhs`.
pub fn binary_less_than<Var: IntegerVariable + 'static>(lhs: Var, rhs: Var) -> impl Constraint {
    binary_less_than_or_equals(lhs.offset(1), rhs.scaled(1))
}

/// Create the [`Constraint`] `lhs >= rhs`.
pub fn binary_greater_than_or_equals<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: Var,
) -> impl Constraint {
    binary_less_than_or_equals(rhs, lhs)
}

/// Create the [`Constraint`] `lhs > rhs`.
pub fn binary_greater_than<Var: IntegerVariable + 'static>(
    lhs: Var,
    rhs: Var,
) -> impl Constraint {
    binary_less_than(rhs, lhs)
}

struct EqualConstraint<Var> {
    terms: Box<[Var]>,
    rhs: i32,
}

/// Creates the [`Constraint`] `\sum terms_i = rhs`.
pub fn equals<Var: IntegerVariable + 'static>(
    terms: impl Into<Box<[Var]>>,
    rhs: i32,
) -> impl Constraint {
    EqualConstraint {
        terms: terms.into(),
        rhs,
    }
}

/// Creates the [`Constraint`] `lhs = rhs`.
pub fn binary_equals<Var: IntegerVariable + 'static>(lhs: Var, rhs: Var) -> impl Constraint {
    equals([lhs.scaled(1), rhs.scaled(-1)], 0)
}

/// Creates the [`Constraint`] `a + b = c`.
pub fn plus<Var: IntegerVariable + 'static>(a: Var, b: Var, c: Var) -> impl Constraint {
    equals([a.scaled(1), b.scaled(1), c.scaled(-1)], 0)
}

impl<Var> Constraint for EqualConstraint<Var>
where
    Var: IntegerVariable + 'static,
{
    fn post(self, solver: &mut Solver) -> Result<(), DeclarationError> {
        less_than_or_equals(self.terms.clone(), self.rhs).post(solver)?;
        greater_than_or_equals(self.terms, self.rhs).post(solver)
    }
}

/// Creates the [`Constraint`] `lhs != rhs`.
pub fn binary_not_equals<Var: IntegerVariable + 'static>(lhs: Var, rhs: Var) -> impl Constraint {
    BinaryNotEqualsPropagatorArgs { a: lhs, b: rhs }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate;

    #[test]
    fn equality_is_enforced_in_both_directions() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 10).expect("non-empty");
        let y = solver.new_bounded_integer(3, 5).expect("non-empty");

        solver
            .add_constraint(binary_equals(x, y))
            .expect("feasible");
        assert_eq!((solver.lower_bound(&x), solver.upper_bound(&x)), (3, 5));

        solver.post(predicate![x <= 4]).expect("feasible");
        assert_eq!(solver.upper_bound(&y), 4);
    }

    #[test]
    fn strict_inequalities_are_offset_by_one() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 10).expect("non-empty");
        let y = solver.new_bounded_integer(0, 4).expect("non-empty");

        solver
            .add_constraint(binary_less_than(x, y))
            .expect("feasible");
        assert_eq!(solver.upper_bound(&x), 3);
        assert_eq!(solver.lower_bound(&y), 1);

        solver
            .add_constraint(greater_than([x], 1))
            .expect("feasible");
        assert_eq!(solver.lower_bound(&x), 2);
        assert_eq!(solver.lower_bound(&y), 3);
    }

    #[test]
    fn plus_relates_three_variables() {
        let mut solver = Solver::default();
        let a = solver.new_bounded_integer(1, 2).expect("non-empty");
        let b = solver.new_bounded_integer(3, 4).expect("non-empty");
        let c = solver.new_bounded_integer(0, 100).expect("non-empty");

        solver.add_constraint(plus(a, b, c)).expect("feasible");
        assert_eq!((solver.lower_bound(&c), solver.upper_bound(&c)), (4, 6));
    }

    #[test]
    fn an_infeasible_constraint_is_reported() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 1).expect("non-empty");
        let y = solver.new_bounded_integer(0, 1).expect("non-empty");

        let result = solver.add_constraint(greater_than_or_equals([x, y], 3));
        assert_eq!(result, Err(DeclarationError::InfeasibleConstraint));
        assert!(solver.is_infeasible());
    }
}
