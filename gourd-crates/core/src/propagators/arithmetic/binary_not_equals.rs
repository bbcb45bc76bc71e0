use crate::basic_types::PropagationStatusCP;
use crate::engine::variables::IntegerVariable;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Priority;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

/// The [`PropagatorConstructor`] for the [`BinaryNotEqualsPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagatorArgs<AVar, BVar> {
    pub(crate) a: AVar,
    pub(crate) b: BVar,
}

impl<AVar, BVar> PropagatorConstructor for BinaryNotEqualsPropagatorArgs<AVar, BVar>
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    type PropagatorImpl = BinaryNotEqualsPropagator<AVar, BVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        // Nothing can be pruned until one side is fixed.
        context.register(self.a.clone(), DomainEvents::ASSIGN, LocalId::from(0));
        context.register(self.b.clone(), DomainEvents::ASSIGN, LocalId::from(1));

        BinaryNotEqualsPropagator {
            a: self.a,
            b: self.b,
        }
    }
}

/// Forward checking for `a != b`: once one side is fixed, its value is removed from the other.
#[derive(Clone, Debug)]
pub(crate) struct BinaryNotEqualsPropagator<AVar, BVar> {
    a: AVar,
    b: BVar,
}

fn fixed_value<Var: IntegerVariable>(context: &impl ReadDomains, var: &Var) -> Option<i32> {
    context
        .is_fixed(var)
        .then(|| context.lower_bound(var))
}

impl<AVar, BVar> Propagator for BinaryNotEqualsPropagator<AVar, BVar>
where
    AVar: IntegerVariable + 'static,
    BVar: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "BinaryNotEq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        match (
            fixed_value(&context, &self.a),
            fixed_value(&context, &self.b),
        ) {
            (Some(a), Some(b)) if a == b => return Err(context.contradiction()),
            (Some(a), None) => context.remove(&self.b, a)?,
            (None, Some(b)) => context.remove(&self.a, b)?,
            _ => {}
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        matches!(
            (fixed_value(&context, &self.a), fixed_value(&context, &self.b)),
            (Some(a), Some(b)) if a != b
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;
    use crate::variables::TransformableVariable;

    #[test]
    fn an_assigned_variable_is_removed_from_the_other_domain() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(2, 2);
        let b = solver.new_variable(0, 4);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        assert!(!solver.contains(b, 2));
        solver.assert_bounds(b, 0, 4);
    }

    #[test]
    fn removing_a_bound_value_tightens_the_bound() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 4);
        let b = solver.new_variable(0, 4);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect("no conflict");

        solver.post(predicate![b == 4]).expect("feasible");
        solver.assert_bounds(a, 0, 3);
    }

    #[test]
    fn the_removed_value_is_translated_through_views() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(0, 4);
        let b = solver.new_variable(3, 3);

        // a + 1 != b
        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a: a.offset(1), b: b.scaled(1) })
            .expect("no conflict");

        assert!(!solver.contains(a, 2));
    }

    #[test]
    fn equal_fixed_variables_are_a_contradiction() {
        let mut solver = TestSolver::default();
        let a = solver.new_variable(1, 1);
        let b = solver.new_variable(1, 1);

        let _ = solver
            .new_propagator(BinaryNotEqualsPropagatorArgs { a, b })
            .expect_err("a and b are equal");
    }
}
