use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::DomainId;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the smallest ratio between its domain
/// size and its weight.
///
/// The weight of a variable starts at one and is incremented every time a propagator watching the
/// variable fails, so the selector gravitates towards the variables involved in many failures.
/// Ties are broken by the order of the provided variables.
pub struct DomOverWeightedDegree {
    variables: Vec<DomainId>,
    tie_breaker: InOrderTieBreaker<DomainId, f64>,
}

impl std::fmt::Debug for DomOverWeightedDegree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomOverWeightedDegree").finish()
    }
}

impl DomOverWeightedDegree {
    pub fn new(variables: &[DomainId]) -> Self {
        if variables.is_empty() {
            warn!("The DomOverWeightedDegree variable selector was not provided with any variables");
        }
        DomOverWeightedDegree {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Minimum),
        }
    }
}

impl VariableSelector<DomainId> for DomOverWeightedDegree {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<DomainId> {
        for &variable in self.variables.iter() {
            if context.is_fixed(&variable) {
                continue;
            }

            let ratio = context.domain_size(&variable) as f64 / context.weight(variable) as f64;
            self.tie_breaker.consider(variable, ratio);
        }

        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::basic_types::PropagationStatusCP;
    use crate::engine::State;
    use crate::propagation::DomainEvents;
    use crate::propagation::LocalId;
    use crate::propagation::PropagationContext;
    use crate::propagation::PropagationContextMut;
    use crate::propagation::Propagator;
    use crate::propagation::PropagatorConstructor;
    use crate::propagation::PropagatorConstructorContext;

    /// Fails as soon as its variable is fixed.
    struct NeverFixed(DomainId);

    impl PropagatorConstructor for NeverFixed {
        type PropagatorImpl = NeverFixed;

        fn create(self, mut context: PropagatorConstructorContext) -> Self::PropagatorImpl {
            context.register(self.0, DomainEvents::ASSIGN, LocalId::from(0));
            self
        }
    }

    impl Propagator for NeverFixed {
        fn name(&self) -> &str {
            "NeverFixed"
        }

        fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP {
            if context.is_fixed(&self.0) {
                Err(context.contradiction())
            } else {
                Ok(())
            }
        }

        fn is_satisfied(&self, context: PropagationContext) -> bool {
            !context.is_fixed(&self.0)
        }
    }

    #[test]
    fn without_failures_the_smallest_domain_is_selected() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 9);
        let y = state.new_interval_variable(0, 4);

        let mut strategy = DomOverWeightedDegree::new(&[x, y]);
        let mut context = SelectionContext::new(&state);

        assert_eq!(Some(y), strategy.select_variable(&mut context));
    }

    #[test]
    fn failures_increase_the_weight() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 5);
        let y = state.new_interval_variable(0, 3);
        let _ = state.add_propagator(NeverFixed(x));
        state.propagate_to_fixed_point().expect("x is not fixed");

        for _ in 0..3 {
            state.new_checkpoint();
            let _ = state.post(crate::predicate![x == 1]).expect("in domain");
            assert!(state.propagate_to_fixed_point().is_err());
            state.restore_to(0);
        }

        assert_eq!(4, state.weight(x));

        let mut strategy = DomOverWeightedDegree::new(&[x, y]);
        let mut context = SelectionContext::new(&state);
        assert_eq!(Some(x), strategy.select_variable(&mut context));
    }
}
