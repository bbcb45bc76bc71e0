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
use crate::variables::SetVariable;

/// The [`PropagatorConstructor`] for the [`SetCardinalityPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct SetCardinalityPropagatorArgs<Var> {
    pub(crate) set: SetVariable,
    pub(crate) cardinality: Var,
}

impl<Var: IntegerVariable + 'static> PropagatorConstructor for SetCardinalityPropagatorArgs<Var> {
    type PropagatorImpl = SetCardinalityPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.set, DomainEvents::ANY_SET, LocalId::from(0));
        context.register(self.cardinality.clone(), DomainEvents::BOUNDS, LocalId::from(1));

        SetCardinalityPropagator {
            set: self.set,
            cardinality: self.cardinality,
        }
    }
}

/// Propagator for `|set| = cardinality`.
#[derive(Clone, Debug)]
pub(crate) struct SetCardinalityPropagator<Var> {
    set: SetVariable,
    cardinality: Var,
}

fn as_bound(size: u64) -> i32 {
    i32::try_from(size).unwrap_or(i32::MAX)
}

impl<Var: IntegerVariable + 'static> Propagator for SetCardinalityPropagator<Var> {
    fn name(&self) -> &str {
        "SetCardinality"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let min_cardinality = as_bound(context.glb(self.set).len());
        let max_cardinality = as_bound(context.lub(self.set).len());

        context.set_lower_bound(&self.cardinality, min_cardinality)?;
        context.set_upper_bound(&self.cardinality, max_cardinality)?;

        if context.upper_bound(&self.cardinality) == min_cardinality {
            context.collapse_to_glb(self.set)?;
        } else if context.lower_bound(&self.cardinality) == max_cardinality {
            context.collapse_to_lub(self.set)?;
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        context.is_set_bound(self.set)
            && context.is_fixed(&self.cardinality)
            && context.lower_bound(&self.cardinality) == as_bound(context.glb(self.set).len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;

    #[test]
    fn the_cardinality_is_bounded_by_the_set() {
        let mut solver = TestSolver::default();
        let set = solver.new_set_variable(&[1], &[1, 2, 3, 4]);
        let cardinality = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(SetCardinalityPropagatorArgs { set, cardinality })
            .expect("feasible");

        solver.assert_bounds(cardinality, 1, 4);
    }

    #[test]
    fn meeting_bounds_collapse_the_set() {
        let mut solver = TestSolver::default();
        let set = solver.new_set_variable(&[1], &[1, 2, 3]);
        let cardinality = solver.new_variable(0, 10);

        let _ = solver
            .new_propagator(SetCardinalityPropagatorArgs { set, cardinality })
            .expect("feasible");

        solver.new_checkpoint();
        solver.post(predicate![cardinality <= 1]).expect("feasible");
        assert_eq!(solver.lub(set), vec![1]);

        solver.synchronise(0);
        solver.post(predicate![cardinality >= 3]).expect("feasible");
        assert_eq!(solver.glb(set), vec![1, 2, 3]);
    }

    #[test]
    fn an_unreachable_cardinality_is_a_contradiction() {
        let mut solver = TestSolver::default();
        let set = solver.new_set_variable(&[1, 2], &[1, 2, 3]);
        let cardinality = solver.new_variable(4, 5);

        let _ = solver
            .new_propagator(SetCardinalityPropagatorArgs { set, cardinality })
            .expect_err("at most three elements");
    }
}
