use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::TrailedInteger;
use crate::engine::domains::DomainEvent;
use crate::engine::variables::IntegerVariable;
use crate::propagation::DomainEvents;
use crate::propagation::EnqueueDecision;
use crate::propagation::LocalId;
use crate::propagation::ManipulateTrailedValues;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Priority;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::ReadDomains;

/// The status of a variable with respect to the counted value.
const EXCLUDED: i64 = 0;
const POSSIBLE: i64 = 1;
const FIXED: i64 = 2;

/// The [`PropagatorConstructor`] for the [`CountPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct CountPropagatorArgs<Var, CVar> {
    pub(crate) variables: Box<[Var]>,
    pub(crate) value: i32,
    pub(crate) count: CVar,
}

impl<Var, CVar> PropagatorConstructor for CountPropagatorArgs<Var, CVar>
where
    Var: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
{
    type PropagatorImpl = CountPropagator<Var, CVar>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let CountPropagatorArgs {
            variables,
            value,
            count,
        } = self;

        let mut statuses = Vec::with_capacity(variables.len());
        let mut num_fixed = 0;
        let mut num_possible = 0;

        for (i, variable) in variables.iter().enumerate() {
            context.register(variable.clone(), DomainEvents::ANY_INT, LocalId::from(i as u32));

            let status = status_of(&context, variable, value);
            num_fixed += (status == FIXED) as i64;
            num_possible += (status != EXCLUDED) as i64;
            statuses.push(context.new_trailed_integer(status));
        }

        context.register(
            count.clone(),
            DomainEvents::BOUNDS,
            LocalId::from(variables.len() as u32),
        );

        let num_fixed = context.new_trailed_integer(num_fixed);
        let num_possible = context.new_trailed_integer(num_possible);

        CountPropagator {
            variables,
            value,
            count,
            statuses: statuses.into(),
            num_fixed,
            num_possible,
        }
    }
}

fn status_of<Var: IntegerVariable>(context: &impl ReadDomains, variable: &Var, value: i32) -> i64 {
    if !context.contains(variable, value) {
        EXCLUDED
    } else if context.is_fixed(variable) {
        FIXED
    } else {
        POSSIBLE
    }
}

/// Propagator for the constraint `|{ i | variables[i] = value }| = count`.
///
/// The number of variables fixed to the value and the number of variables which can still take
/// the value are maintained incrementally in trailed integers.
#[derive(Clone, Debug)]
pub(crate) struct CountPropagator<Var, CVar> {
    variables: Box<[Var]>,
    value: i32,
    count: CVar,

    /// The status of every variable with respect to `value`.
    statuses: Box<[TrailedInteger]>,
    num_fixed: TrailedInteger,
    num_possible: TrailedInteger,
}

impl<Var, CVar> Propagator for CountPropagator<Var, CVar>
where
    Var: IntegerVariable + 'static,
    CVar: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "Count"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn notify(
        &mut self,
        mut context: NotificationContext,
        local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;
        if index == self.variables.len() {
            return EnqueueDecision::Enqueue;
        }

        let old_status = context.value(self.statuses[index]);
        let new_status = status_of(&context, &self.variables[index], self.value);
        if old_status == new_status {
            return EnqueueDecision::Skip;
        }

        if new_status == FIXED {
            context.add_assign(self.num_fixed, 1);
        }
        if new_status == EXCLUDED {
            context.add_assign(self.num_possible, -1);
        }
        context.assign_trailed(self.statuses[index], new_status);

        EnqueueDecision::Enqueue
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let num_fixed = context.value(self.num_fixed) as i32;
        let num_possible = context.value(self.num_possible) as i32;

        context.set_lower_bound(&self.count, num_fixed)?;
        context.set_upper_bound(&self.count, num_possible)?;

        if num_fixed == num_possible {
            return Ok(());
        }

        if context.upper_bound(&self.count) == num_fixed {
            // Every variable which is not yet fixed to the value has to avoid it.
            for variable in self.variables.iter() {
                if context.contains(variable, self.value) && !context.is_fixed(variable) {
                    context.remove(variable, self.value)?;
                }
            }
        } else if context.lower_bound(&self.count) == num_possible {
            // Every variable which can take the value has to take it.
            for variable in self.variables.iter() {
                if context.contains(variable, self.value) {
                    context.assign(variable, self.value)?;
                }
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        let occurrences = self
            .variables
            .iter()
            .filter(|variable| context.is_fixed(*variable) && context.contains(*variable, self.value))
            .count() as i32;

        context.is_fixed(&self.count) && context.lower_bound(&self.count) == occurrences
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;
    use crate::predicate;
    use crate::variables::DomainId;

    fn setup(solver: &mut TestSolver, count: DomainId) -> Vec<DomainId> {
        let variables = (0..4)
            .map(|_| solver.new_variable(1, 3))
            .collect::<Vec<_>>();

        let _ = solver
            .new_propagator(CountPropagatorArgs {
                variables: variables.clone().into(),
                value: 2,
                count,
            })
            .expect("feasible");

        variables
    }

    #[test]
    fn the_count_is_bounded_by_the_variables() {
        let mut solver = TestSolver::default();
        let count = solver.new_variable(-5, 10);
        let _ = setup(&mut solver, count);

        solver.assert_bounds(count, 0, 4);
    }

    #[test]
    fn a_full_count_fixes_every_variable() {
        let mut solver = TestSolver::default();
        let count = solver.new_variable(0, 4);
        let variables = setup(&mut solver, count);

        solver.post(predicate![count == 4]).expect("feasible");

        for variable in variables {
            solver.assert_bounds(variable, 2, 2);
        }
    }

    #[test]
    fn a_reached_count_removes_the_value_elsewhere() {
        let mut solver = TestSolver::default();
        let count = solver.new_variable(0, 1);
        let variables = setup(&mut solver, count);

        solver.post(predicate![variables[0] == 2]).expect("feasible");

        solver.assert_bounds(count, 1, 1);
        for &variable in &variables[1..] {
            assert!(!solver.contains(variable, 2));
        }
    }

    #[test]
    fn excluding_values_lowers_the_upper_bound_and_is_undone() {
        let mut solver = TestSolver::default();
        let count = solver.new_variable(0, 4);
        let variables = setup(&mut solver, count);

        solver.new_checkpoint();
        solver.post(predicate![variables[0] != 2]).expect("feasible");
        solver.post(predicate![variables[1] >= 3]).expect("feasible");
        solver.assert_bounds(count, 0, 2);

        solver.synchronise(0);
        solver.assert_bounds(count, 0, 4);

        solver.new_checkpoint();
        solver.post(predicate![variables[2] == 2]).expect("feasible");
        solver.assert_bounds(count, 1, 4);
    }

    #[test]
    fn too_many_occurrences_are_a_contradiction() {
        let mut solver = TestSolver::default();
        let count = solver.new_variable(0, 1);
        let variables = setup(&mut solver, count);

        solver.post(predicate![variables[0] == 2]).expect("feasible");
        let _ = solver
            .post(predicate![variables[1] == 2])
            .expect_err("two occurrences exceed the count");
    }
}
