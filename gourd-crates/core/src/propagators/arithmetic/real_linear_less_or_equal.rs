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
use crate::variables::RealVariable;

/// The [`PropagatorConstructor`] for the [`RealLinearLessOrEqualPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct RealLinearLessOrEqualPropagatorArgs {
    /// The terms `(a_i, x_i)` of the left-hand side.
    pub(crate) terms: Box<[(f64, RealVariable)]>,
    pub(crate) c: f64,
}

impl PropagatorConstructor for RealLinearLessOrEqualPropagatorArgs {
    type PropagatorImpl = RealLinearLessOrEqualPropagator;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        let RealLinearLessOrEqualPropagatorArgs { terms, c } = self;

        for (i, &(_, real)) in terms.iter().enumerate() {
            context.register_real(real, DomainEvents::BOUNDS, LocalId::from(i as u32));
        }

        RealLinearLessOrEqualPropagator { terms, c }
    }
}

/// Bounds propagator for `\sum a_i * x_i <= c` over real variables.
///
/// Bounds are compared with the precision of the variables: the sum of the minimal contributions
/// may exceed `c` by the accumulated precision before the propagator reports a contradiction.
#[derive(Clone, Debug)]
pub(crate) struct RealLinearLessOrEqualPropagator {
    terms: Box<[(f64, RealVariable)]>,
    c: f64,
}

impl RealLinearLessOrEqualPropagator {
    fn minimal_contribution(context: &impl ReadDomains, coefficient: f64, real: RealVariable) -> f64 {
        let domain = context.real_domain(real);
        if coefficient >= 0.0 {
            coefficient * domain.min()
        } else {
            coefficient * domain.max()
        }
    }

    fn tolerance(&self, context: &impl ReadDomains) -> f64 {
        self.terms
            .iter()
            .map(|&(coefficient, real)| coefficient.abs() * context.real_domain(real).precision())
            .sum()
    }
}

impl Propagator for RealLinearLessOrEqualPropagator {
    fn name(&self) -> &str {
        "RealLinearLeq"
    }

    fn priority(&self) -> Priority {
        Priority::Medium
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let minimal_sum = self
            .terms
            .iter()
            .map(|&(coefficient, real)| Self::minimal_contribution(&context, coefficient, real))
            .sum::<f64>();

        if minimal_sum > self.c + self.tolerance(&context) {
            return Err(context.contradiction());
        }

        for &(coefficient, real) in self.terms.iter() {
            if coefficient == 0.0 {
                continue;
            }

            let slack =
                self.c - (minimal_sum - Self::minimal_contribution(&context, coefficient, real));
            let bound = slack / coefficient;

            if coefficient > 0.0 {
                context.set_real_upper_bound(real, bound)?;
            } else {
                context.set_real_lower_bound(real, bound)?;
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        let lhs = self
            .terms
            .iter()
            .map(|&(coefficient, real)| coefficient * context.real_domain(real).mid())
            .sum::<f64>();

        lhs <= self.c + self.tolerance(&context)
    }
}
