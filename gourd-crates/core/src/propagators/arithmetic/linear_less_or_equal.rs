use crate::basic_types::PropagationStatusCP;
use crate::engine::cp::TrailedInteger;
use crate::engine::domains::DomainEvent;
use crate::propagation::DomainEvents;
use crate::propagation::EnqueueDecision;
use crate::propagation::LocalId;
use crate::propagation::ManipulateTrailedValues;
use crate::propagation::NotificationContext;
use crate::propagation::PropagationContext;
use crate::propagation::PropagationContextMut;
use crate::propagation::Propagator;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorConstructorContext;
use crate::propagation::Priority;
use crate::propagation::ReadDomains;
use crate::variables::IntegerVariable;

/// The [`PropagatorConstructor`] for the [`LinearLessOrEqualPropagator`].
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagatorArgs<Var> {
    pub(crate) terms: Box<[Var]>,
    pub(crate) rhs: i32,
}

impl<Var> PropagatorConstructor for LinearLessOrEqualPropagatorArgs<Var>
where
    Var: IntegerVariable + 'static,
{
    type PropagatorImpl = LinearLessOrEqualPropagator<Var>;

    fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
        // Terms which are already fixed only shift the right-hand side.
        let (fixed, terms): (Vec<Var>, Vec<Var>) = self
            .terms
            .into_vec()
            .into_iter()
            .partition(|term| context.is_fixed(term));
        let rhs = self.rhs as i64
            - fixed
                .iter()
                .map(|term| context.lower_bound(term) as i64)
                .sum::<i64>();

        let mut term_lower_bounds = Vec::with_capacity(terms.len());
        for (index, term) in terms.iter().enumerate() {
            context.register(
                term.clone(),
                DomainEvents::LOWER_BOUND,
                LocalId::from(index as u32),
            );
            let lower_bound = context.lower_bound(term) as i64;
            term_lower_bounds.push(context.new_trailed_integer(lower_bound));
        }

        let sum_of_lower_bounds = terms
            .iter()
            .map(|term| context.lower_bound(term) as i64)
            .sum();
        let sum_of_lower_bounds = context.new_trailed_integer(sum_of_lower_bounds);

        LinearLessOrEqualPropagator {
            terms: terms.into(),
            rhs,
            sum_of_lower_bounds,
            term_lower_bounds: term_lower_bounds.into(),
        }
    }
}

/// Bounds consistent propagator for `terms[0] + ... + terms[n - 1] <= rhs`.
///
/// The slack is `rhs` minus the sum of the lower bounds; no term can exceed its lower bound by
/// more than the slack. The sum is kept up to date in [`TrailedInteger`]s as lower bounds rise,
/// so a propagation does not have to recompute it.
#[derive(Clone, Debug)]
pub(crate) struct LinearLessOrEqualPropagator<Var> {
    terms: Box<[Var]>,
    rhs: i64,

    sum_of_lower_bounds: TrailedInteger,
    /// The lower bound of every term as seen by the last notification.
    term_lower_bounds: Box<[TrailedInteger]>,
}

impl<Var> Propagator for LinearLessOrEqualPropagator<Var>
where
    Var: IntegerVariable + 'static,
{
    fn name(&self) -> &str {
        "LinearLeq"
    }

    fn priority(&self) -> Priority {
        Priority::High
    }

    fn notify(
        &mut self,
        mut context: NotificationContext,
        local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        let index = local_id.unpack() as usize;

        let known = context.value(self.term_lower_bounds[index]);
        let actual = context.lower_bound(&self.terms[index]) as i64;
        if actual <= known {
            return EnqueueDecision::Skip;
        }

        context.add_assign(self.sum_of_lower_bounds, actual - known);
        context.assign_trailed(self.term_lower_bounds[index], actual);

        EnqueueDecision::Enqueue
    }

    fn propagate(&mut self, mut context: PropagationContextMut) -> PropagationStatusCP {
        let slack = self.rhs - context.value(self.sum_of_lower_bounds);
        if slack < 0 {
            return Err(context.contradiction());
        }

        for term in self.terms.iter() {
            let upper_bound = context.lower_bound(term) as i64 + slack;
            if upper_bound < context.upper_bound(term) as i64 {
                context.set_upper_bound(term, upper_bound as i32)?;
            }
        }

        Ok(())
    }

    fn is_satisfied(&self, context: PropagationContext) -> bool {
        self.terms
            .iter()
            .map(|term| context.lower_bound(term) as i64)
            .sum::<i64>()
            <= self.rhs
    }
}
