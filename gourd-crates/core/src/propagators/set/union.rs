use super::all_bound_and;
use crate::basic_types::PropagationStatusCP;
use crate::propagation::DomainEvents;
use crate::propagation::LocalId;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Priority;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;
use crate::variables::SetVariable;

/// The [`PropagatorConstructor`] for the [`UnionPropagator`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct UnionPropagatorArgs {
    pub(crate) x: SetVariable,
    pub(crate) y: SetVariable,
    pub(crate) union: SetVariable,
}

impl PropagatorConstructor for UnionPropagatorArgs {
    type PropagatorImpl = UnionPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.x, DomainEvents::ANY_SET, LocalId::from(0));
        context.register_set(self.y, DomainEvents::ANY_SET, LocalId::from(1));
        context.register_set(self.union, DomainEvents::ANY_SET, LocalId::from(2));

        UnionPropagator {
            x: self.x,
            y: self.y,
            z: self.union,
        }
    }
}

/// Propagator for `x ∪ y = z`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct UnionPropagator {
    x: SetVariable,
    y: SetVariable,
    z: SetVariable,
}

impl UnionPropagator {
    /// An element which has to be in `z` but cannot be in `b` has to be in `a`.
    fn include_in_other(
        context: &mut PropagationContextMut,
        a: SetVariable,
        b: SetVariable,
        z: SetVariable,
    ) -> PropagationStatusCP {
        let only_in_a = context.glb(z).difference(context.lub(b));
        context.include_all(a, &only_in_a)?;
        Ok(())
    }
}

impl Propagator for UnionPropagator {
    fn name(&self) -> &str {
        "Union"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        // glb(x) ∪ glb(y) ⊆ z ⊆ lub(x) ∪ lub(y)
        let glb = context.glb(self.x).union(context.glb(self.y));
        context.include_all(self.z, &glb)?;
        let lub = context.lub(self.x).union(context.lub(self.y));
        context.restrict(self.z, &lub)?;

        // x ⊆ z and y ⊆ z
        let z_lub = context.lub(self.z).clone();
        context.restrict(self.x, &z_lub)?;
        context.restrict(self.y, &z_lub)?;

        Self::include_in_other(&mut context, self.x, self.y, self.z)?;
        Self::include_in_other(&mut context, self.y, self.x, self.z)?;

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        all_bound_and(context, &[self.x, self.y, self.z], || {
            context.glb(self.x).union(context.glb(self.y)) == *context.glb(self.z)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;

    #[test]
    fn the_union_is_bounded_by_the_operands() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[1], &[1, 2]);
        let y = solver.new_set_variable(&[3], &[3, 4]);
        let z = solver.new_set_variable(&[], &[1, 2, 3, 4, 5]);

        let _ = solver
            .new_propagator(UnionPropagatorArgs { x, y, union: z })
            .expect("feasible");

        assert_eq!(solver.glb(z), vec![1, 3]);
        assert_eq!(solver.lub(z), vec![1, 2, 3, 4]);
    }

    #[test]
    fn an_element_of_the_union_outside_one_operand_is_in_the_other() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[], &[1, 2, 3]);
        let y = solver.new_set_variable(&[], &[2, 3, 4]);
        let z = solver.new_set_variable(&[], &[1, 2, 3, 4, 5]);

        let _ = solver
            .new_propagator(UnionPropagatorArgs { x, y, union: z })
            .expect("feasible");

        solver.post(predicate![z contains 1]).expect("feasible");
        solver.post(predicate![z contains 4]).expect("feasible");
        assert_eq!(solver.glb(x), vec![1]);
        assert_eq!(solver.glb(y), vec![4]);

        solver.post(predicate![z excludes 2]).expect("feasible");
        assert_eq!(solver.lub(x), vec![1, 3]);
        assert_eq!(solver.lub(y), vec![3, 4]);
    }
}
