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

/// The [`PropagatorConstructor`] for the [`DisjointPropagator`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisjointPropagatorArgs {
    pub(crate) x: SetVariable,
    pub(crate) y: SetVariable,
}

impl PropagatorConstructor for DisjointPropagatorArgs {
    type PropagatorImpl = DisjointPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.x, DomainEvents::GLB, LocalId::from(0));
        context.register_set(self.y, DomainEvents::GLB, LocalId::from(1));

        DisjointPropagator {
            x: self.x,
            y: self.y,
        }
    }
}

/// Propagator for `x ∩ y = ∅`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DisjointPropagator {
    x: SetVariable,
    y: SetVariable,
}

impl Propagator for DisjointPropagator {
    fn name(&self) -> &str {
        "Disjoint"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let x_glb = context.glb(self.x).clone();
        context.exclude_all(self.y, &x_glb)?;

        let y_glb = context.glb(self.y).clone();
        context.exclude_all(self.x, &y_glb)?;

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        all_bound_and(context, &[self.x, self.y], || {
            context.glb(self.x).is_disjoint_from(context.glb(self.y))
        })
    }
}
