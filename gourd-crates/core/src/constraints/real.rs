use super::Constraint;
use crate::propagators::arithmetic::RealLinearLessOrEqualPropagatorArgs;
use crate::variables::RealVariable;
use crate::DeclarationError;
use crate::Solver;

struct RealLinearConstraint {
    weights: Box<[f64]>,
    variables: Box<[RealVariable]>,
    rhs: f64,
}

/// Creates the [`Constraint`] `\sum weights_i * variables_i <= rhs` over real variables.
///
/// Bounds are compared using the precision of the variables. Posting fails with
/// [`DeclarationError::LengthMismatch`] if there is not exactly one weight per variable.
pub fn real_less_than_or_equals(
    weights: impl Into<Box<[f64]>>,
    variables: impl Into<Box<[RealVariable]>>,
    rhs: f64,
) -> impl Constraint {
    RealLinearConstraint {
        weights: weights.into(),
        variables: variables.into(),
        rhs,
    }
}

/// Creates the [`Constraint`] `\sum weights_i * variables_i >= rhs` over real variables.
pub fn real_greater_than_or_equals(
    weights: impl Into<Box<[f64]>>,
    variables: impl Into<Box<[RealVariable]>>,
    rhs: f64,
) -> impl Constraint {
    let negated = weights
        .into()
        .iter()
        .map(|weight| -weight)
        .collect::<Box<[_]>>();
    real_less_than_or_equals(negated, variables, -rhs)
}

impl Constraint for RealLinearConstraint {
    fn post(self, solver: &mut Solver) -> Result<(), DeclarationError> {
        if self.weights.len() != self.variables.len() {
            return Err(DeclarationError::LengthMismatch {
                expected: self.variables.len(),
                actual: self.weights.len(),
            });
        }

        let terms = self
            .weights
            .iter()
            .copied()
            .zip(self.variables.iter().copied())
            .collect();

        let _ = solver.add_propagator(RealLinearLessOrEqualPropagatorArgs {
            terms,
            c: self.rhs,
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_tightened() {
        let mut solver = Solver::default();
        let x = solver.new_real_variable(0.0, 10.0).expect("valid");
        let y = solver.new_real_variable(2.0, 10.0).expect("valid");

        solver
            .add_constraint(real_less_than_or_equals([1.0, 1.0], [x, y], 5.0))
            .expect("feasible");

        let domain = solver.real_domain(x);
        assert!((domain.max() - 3.0).abs() <= domain.precision());
    }

    #[test]
    fn every_variable_needs_a_weight() {
        let mut solver = Solver::default();
        let x = solver.new_real_variable(0.0, 10.0).expect("valid");

        let result = solver.add_constraint(real_less_than_or_equals([1.0, 2.0], [x], 5.0));
        assert_eq!(
            result,
            Err(DeclarationError::LengthMismatch {
                expected: 1,
                actual: 2
            })
        );
    }
}
