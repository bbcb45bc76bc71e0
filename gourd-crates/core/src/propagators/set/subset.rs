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

/// The [`PropagatorConstructor`] for the [`SubsetPropagator`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct SubsetPropagatorArgs {
    pub(crate) subset: SetVariable,
    pub(crate) superset: SetVariable,
}

impl PropagatorConstructor for SubsetPropagatorArgs {
    type PropagatorImpl = SubsetPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.subset, DomainEvents::GLB, LocalId::from(0));
        context.register_set(self.superset, DomainEvents::LUB, LocalId::from(1));

        SubsetPropagator {
            subset: self.subset,
            superset: self.superset,
        }
    }
}

/// Propagator for `subset ⊆ superset`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SubsetPropagator {
    subset: SetVariable,
    superset: SetVariable,
}

impl Propagator for SubsetPropagator {
    fn name(&self) -> &str {
        "Subset"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let subset_glb = context.glb(self.subset).clone();
        context.include_all(self.superset, &subset_glb)?;

        let superset_lub = context.lub(self.superset).clone();
        context.restrict(self.subset, &superset_lub)?;

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        all_bound_and(context, &[self.subset, self.superset], || {
            context
                .glb(self.subset)
                .is_subset_of(context.glb(self.superset))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;

    #[test]
    fn bounds_are_transferred() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[1], &[1, 2, 3]);
        let y = solver.new_set_variable(&[], &[1, 2, 4]);

        let _ = solver
            .new_propagator(SubsetPropagatorArgs {
                subset: x,
                superset: y,
            })
            .expect("feasible");

        assert_eq!(solver.glb(y), vec![1]);
        assert_eq!(solver.lub(x), vec![1, 2]);
    }

    #[test]
    fn an_element_outside_the_superset_cannot_be_included() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[], &[1, 2, 3]);
        let y = solver.new_set_variable(&[], &[2, 3, 4]);

        let _ = solver
            .new_propagator(SubsetPropagatorArgs {
                subset: x,
                superset: y,
            })
            .expect("feasible");

        let _ = solver
            .post(predicate![x contains 1])
            .expect_err("1 is not in the lub of y");
    }

    #[test]
    fn excluding_from_the_superset_excludes_from_the_subset() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[], &[1, 2, 3]);
        let y = solver.new_set_variable(&[], &[1, 2, 3]);

        let _ = solver
            .new_propagator(SubsetPropagatorArgs {
                subset: x,
                superset: y,
            })
            .expect("feasible");

        solver.new_checkpoint();
        solver.post(predicate![y excludes 2]).expect("feasible");
        assert_eq!(solver.lub(x), vec![1, 3]);

        solver.synchronise(0);
        assert_eq!(solver.lub(x), vec![1, 2, 3]);
    }
}
