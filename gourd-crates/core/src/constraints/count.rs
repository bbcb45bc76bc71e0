use super::Constraint;
use crate::propagators::CountPropagatorArgs;
use crate::variables::IntegerVariable;
use crate::DeclarationError;
use crate::Solver;

struct CountConstraint<Var, CVar> {
    variables: Box<[Var]>,
    value: i32,
    count: CVar,
}

/// Creates the [`Constraint`] `|{ i | variables[i] = value }| = count`.
///
/// Posting fails with [`DeclarationError::InvalidCardinalityBounds`] if `count` cannot take any
/// value in `0..=variables.len()`.
pub fn count<Var, CVar>(
    variables: impl Into<Box<[Var]>>,
    value: i32,
    count: CVar,
) -> impl Constraint
where
    Var: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
{
    CountConstraint {
        variables: variables.into(),
        value,
        count,
    }
}

impl<Var, CVar> Constraint for CountConstraint<Var, CVar>
where
    Var: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
{
    fn post(self, solver: &mut Solver) -> Result<(), DeclarationError> {
        let lower = solver.lower_bound(&self.count) as i64;
        let upper = solver.upper_bound(&self.count) as i64;
        if upper < 0 || lower > self.variables.len() as i64 {
            return Err(DeclarationError::InvalidCardinalityBounds { lower, upper });
        }

        let _ = solver.add_propagator(CountPropagatorArgs {
            variables: self.variables,
            value: self.value,
            count: self.count,
        })?;
        Ok(())
    }
}
