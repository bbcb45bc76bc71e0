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

/// The [`PropagatorConstructor`] for the [`IntersectionPropagator`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct IntersectionPropagatorArgs {
    pub(crate) x: SetVariable,
    pub(crate) y: SetVariable,
    pub(crate) intersection: SetVariable,
}

impl PropagatorConstructor for IntersectionPropagatorArgs {
    type PropagatorImpl = IntersectionPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        context.register_set(self.x, DomainEvents::ANY_SET, LocalId::from(0));
        context.register_set(self.y, DomainEvents::ANY_SET, LocalId::from(1));
        context.register_set(self.intersection, DomainEvents::ANY_SET, LocalId::from(2));

        IntersectionPropagator {
            x: self.x,
            y: self.y,
            z: self.intersection,
        }
    }
}

/// Propagator for `x ∩ y = z`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IntersectionPropagator {
    x: SetVariable,
    y: SetVariable,
    z: SetVariable,
}

impl IntersectionPropagator {
    /// An element which is definitely in `a` but cannot be in `z` cannot be in `b`.
    fn exclude_from_other(
        context: &mut PropagationContextMut,
        a: SetVariable,
        b: SetVariable,
        z: SetVariable,
    ) -> PropagationStatusCP {
        let outside_z = context.glb(a).difference(context.lub(z));
        context.exclude_all(b, &outside_z)?;
        Ok(())
    }
}

impl Propagator for IntersectionPropagator {
    fn name(&self) -> &str {
        "Intersection"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        // glb(x) ∩ glb(y) ⊆ z ⊆ lub(x) ∩ lub(y)
        let glb = context.glb(self.x).intersection(context.glb(self.y));
        context.include_all(self.z, &glb)?;
        let lub = context.lub(self.x).intersection(context.lub(self.y));
        context.restrict(self.z, &lub)?;

        // z ⊆ x and z ⊆ y
        let z_glb = context.glb(self.z).clone();
        context.include_all(self.x, &z_glb)?;
        context.include_all(self.y, &z_glb)?;

        Self::exclude_from_other(&mut context, self.x, self.y, self.z)?;
        Self::exclude_from_other(&mut context, self.y, self.x, self.z)?;

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        all_bound_and(context, &[self.x, self.y, self.z], || {
            context.glb(self.x).intersection(context.glb(self.y)) == *context.glb(self.z)
        })
    }
}
