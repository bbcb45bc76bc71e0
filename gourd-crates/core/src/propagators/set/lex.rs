use super::all_bound_and;
use crate::basic_types::PropagationStatusCP;
use crate::engine::domains::IntervalDomain;
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

/// The [`PropagatorConstructor`] for the [`LexLessOrEqualPropagator`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct LexLessOrEqualPropagatorArgs {
    pub(crate) smaller: SetVariable,
    pub(crate) larger: SetVariable,
}

impl PropagatorConstructor for LexLessOrEqualPropagatorArgs {
    type PropagatorImpl = LexLessOrEqualPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.smaller, DomainEvents::ANY_SET, LocalId::from(0));
        context.register_set(self.larger, DomainEvents::ANY_SET, LocalId::from(1));

        LexLessOrEqualPropagator {
            smaller: self.smaller,
            larger: self.larger,
        }
    }
}

/// Propagator for `smaller <=lex larger`.
///
/// Sets are compared as their ascending element sequences, where a proper prefix is smaller than
/// the sequence it prefixes. The propagator is domain consistent: every undecided element is
/// probed in both directions against the extreme realisation of the other side.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LexLessOrEqualPropagator {
    smaller: SetVariable,
    larger: SetVariable,
}

/// The lexicographically smallest set between `glb` and `lub`: everything in `lub` up to the
/// largest required element.
fn lex_min(glb: &IntervalDomain, lub: &IntervalDomain) -> Vec<i32> {
    match glb.last() {
        Some(largest_required) => lub
            .values()
            .take_while(|&value| value <= largest_required)
            .collect(),
        None => vec![],
    }
}

/// The lexicographically largest set between `glb` and `lub`: the required elements followed by
/// the largest allowed element.
fn lex_max(glb: &IntervalDomain, lub: &IntervalDomain) -> Vec<i32> {
    let mut values: Vec<i32> = glb.values().collect();
    if let Some(largest) = lub.last() {
        if values.last() != Some(&largest) {
            values.push(largest);
        }
    }
    values
}

#[derive(Clone, Copy, Debug)]
enum Decision {
    Include(i32),
    Exclude(i32),
}

/// Probes every undecided element of a set; `is_feasible` judges a candidate `(glb, lub)` pair.
fn probe(
    glb: &IntervalDomain,
    lub: &IntervalDomain,
    is_feasible: impl Fn(&IntervalDomain, &IntervalDomain) -> bool,
) -> Option<Vec<Decision>> {
    let mut decisions = vec![];

    for value in lub.difference(glb).values() {
        let mut with_value = glb.clone();
        let _ = with_value.insert(value);
        let can_include = is_feasible(&with_value, lub);

        let mut without_value = lub.clone();
        let _ = without_value.remove(value);
        let can_exclude = is_feasible(glb, &without_value);

        match (can_include, can_exclude) {
            (false, false) => return None,
            (false, true) => decisions.push(Decision::Exclude(value)),
            (true, false) => decisions.push(Decision::Include(value)),
            (true, true) => {}
        }
    }

    Some(decisions)
}

fn apply(
    context: &mut PropagationContextMut,
    set: SetVariable,
    decisions: Vec<Decision>,
) -> PropagationStatusCP {
    for decision in decisions {
        match decision {
            Decision::Include(value) => context.include(set, value)?,
            Decision::Exclude(value) => context.exclude(set, value)?,
        }
    }
    Ok(())
}

impl Propagator for LexLessOrEqualPropagator {
    fn name(&self) -> &str {
        "LexLeq"
    }

    fn priority(&self) -> Priority {
        Priority::Low
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let smaller_glb = context.glb(self.smaller).clone();
        let smaller_lub = context.lub(self.smaller).clone();
        let larger_glb = context.glb(self.larger).clone();
        let larger_lub = context.lub(self.larger).clone();

        let smallest = lex_min(&smaller_glb, &smaller_lub);
        let largest = lex_max(&larger_glb, &larger_lub);
        if smallest > largest {
            return Err(context.contradiction());
        }

        let Some(smaller_decisions) = probe(&smaller_glb, &smaller_lub, |glb, lub| {
            lex_min(glb, lub) <= largest
        }) else {
            return Err(context.contradiction());
        };
        let Some(larger_decisions) = probe(&larger_glb, &larger_lub, |glb, lub| {
            smallest <= lex_max(glb, lub)
        }) else {
            return Err(context.contradiction());
        };

        apply(&mut context, self.smaller, smaller_decisions)?;
        apply(&mut context, self.larger, larger_decisions)?;

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        all_bound_and(context, &[self.smaller, self.larger], || {
            context
                .glb(self.smaller)
                .values()
                .le(context.glb(self.larger).values())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cp::test_solver::TestSolver;

    #[test]
    fn extreme_realisations() {
        let glb = IntervalDomain::from_values([3]);
        let lub = IntervalDomain::from_values([1, 3, 5, 7]);

        assert_eq!(lex_min(&glb, &lub), vec![1, 3]);
        assert_eq!(lex_max(&glb, &lub), vec![3, 7]);
        assert_eq!(lex_min(&IntervalDomain::empty(), &lub), Vec::<i32>::new());
        assert_eq!(lex_max(&IntervalDomain::empty(), &lub), vec![7]);
    }

    #[test]
    fn the_smaller_side_cannot_extend_past_the_larger_side() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[], &[1, 2]);
        let y = solver.new_set_variable(&[1], &[1]);

        let _ = solver
            .new_propagator(LexLessOrEqualPropagatorArgs {
                smaller: x,
                larger: y,
            })
            .expect("feasible");

        assert_eq!(solver.lub(x), vec![1]);
        assert_eq!(solver.glb(x), Vec::<i32>::new());
    }

    #[test]
    fn the_larger_side_is_forced_upwards() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[2], &[2]);
        let y = solver.new_set_variable(&[], &[1, 2]);

        let _ = solver
            .new_propagator(LexLessOrEqualPropagatorArgs {
                smaller: x,
                larger: y,
            })
            .expect("feasible");

        assert_eq!(solver.glb(y), vec![2]);
        assert_eq!(solver.lub(y), vec![2]);
    }

    #[test]
    fn incompatible_bounds_fail() {
        let mut solver = TestSolver::default();
        let x = solver.new_set_variable(&[1, 2], &[1, 2]);
        let y = solver.new_set_variable(&[], &[1]);

        let result = solver.new_propagator(LexLessOrEqualPropagatorArgs {
            smaller: x,
            larger: y,
        });
        assert!(result.is_err());
    }
}
