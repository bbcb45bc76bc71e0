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

/// The [`PropagatorConstructor`] for the [`SetEqualityPropagator`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct SetEqualityPropagatorArgs {
    pub(crate) x: SetVariable,
    pub(crate) y: SetVariable,
}

impl PropagatorConstructor for SetEqualityPropagatorArgs {
    type PropagatorImpl = SetEqualityPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.x, DomainEvents::ANY_SET, LocalId::from(0));
        context.register_set(self.y, DomainEvents::ANY_SET, LocalId::from(1));

        SetEqualityPropagator {
            x: self.x,
            y: self.y,
        }
    }
}

/// Propagator for `x = y`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SetEqualityPropagator {
    x: SetVariable,
    y: SetVariable,
}

impl SetEqualityPropagator {
    fn num_undecided(&self, context: &PropagationContextMut) -> u64 {
        [self.x, self.y]
            .into_iter()
            .map(|set| context.lub(set).len() - context.glb(set).len())
            .sum()
    }
}

impl Propagator for SetEqualityPropagator {
    fn name(&self) -> &str {
        "SetEquality"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        loop {
            let undecided_before = self.num_undecided(&context);

            let x_glb = context.glb(self.x).clone();
            context.include_all(self.y, &x_glb)?;
            let y_glb = context.glb(self.y).clone();
            context.include_all(self.x, &y_glb)?;

            let x_lub = context.lub(self.x).clone();
            context.restrict(self.y, &x_lub)?;
            let y_lub = context.lub(self.y).clone();
            context.restrict(self.x, &y_lub)?;

            if self.num_undecided(&context) == undecided_before {
                return Ok(());
            }
        }
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        all_bound_and(context, &[self.x, self.y], || {
            context.glb(self.x) == context.glb(self.y)
        })
    }
}
