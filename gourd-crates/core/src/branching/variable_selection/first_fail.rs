use log::warn;

use crate::branching::tie_breaking::Direction;
use crate::branching::tie_breaking::InOrderTieBreaker;
use crate::branching::tie_breaking::TieBreaker;
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::IntegerVariable;
use crate::gourd_assert_eq_simple;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the variable with the smallest domain (counting the
/// values which are actually in the domain).
///
/// Uses a [`TieBreaker`] to break ties, the default is the [`InOrderTieBreaker`] but it is
/// possible to construct the variable selector with a custom [`TieBreaker`] by using the method
/// [`FirstFail::with_tie_breaker`].
pub struct FirstFail<Var, TieBreaking> {
    variables: Vec<Var>,
    tie_breaker: TieBreaking,
}

impl<Var, TieBreaking> std::fmt::Debug for FirstFail<Var, TieBreaking> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirstFail").finish()
    }
}

impl<Var: Clone> FirstFail<Var, InOrderTieBreaker<Var, u64>> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }
        FirstFail {
            variables: variables.to_vec(),
            tie_breaker: InOrderTieBreaker::new(Direction::Minimum),
        }
    }
}

impl<Var: Clone, TieBreaking: TieBreaker<Var, u64>> FirstFail<Var, TieBreaking> {
    pub fn with_tie_breaker(variables: &[Var], tie_breaker: TieBreaking) -> Self {
        gourd_assert_eq_simple!(
            tie_breaker.get_direction(),
            Direction::Minimum,
            "The provided tie-breaker to FirstFail attempts to find the Maximum value
             instead of the Minimum value, please ensure that you have passed the correct tie-breaker");
        if variables.is_empty() {
            warn!("The FirstFail variable selector was not provided with any variables");
        }

        FirstFail {
            variables: variables.to_vec(),
            tie_breaker,
        }
    }
}

impl<Var, TieBreaking> VariableSelector<Var> for FirstFail<Var, TieBreaking>
where
    Var: IntegerVariable,
    TieBreaking: TieBreaker<Var, u64>,
{
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .filter(|variable| !context.is_fixed(*variable))
            .for_each(|variable| {
                self.tie_breaker
                    .consider(variable.clone(), context.domain_size(variable));
            });
        self.tie_breaker.select()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;
    use crate::predicate;

    #[test]
    fn test_correctly_selected() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 10);
        let y = state.new_interval_variable(5, 20);

        let mut strategy = FirstFail::new(&[x, y]);
        {
            let mut context = SelectionContext::new(&state);
            assert_eq!(Some(x), strategy.select_variable(&mut context));
        }

        let _ = state.post(predicate![y <= 9]).expect("non-empty");
        let mut context = SelectionContext::new(&state);
        assert_eq!(Some(y), strategy.select_variable(&mut context));
    }

    #[test]
    fn holes_count_towards_the_size() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 3);
        let y = state.new_interval_variable(0, 3);

        let _ = state.post(predicate![y != 1]).expect("non-empty");

        let mut strategy = FirstFail::new(&[x, y]);
        let mut context = SelectionContext::new(&state);
        assert_eq!(Some(y), strategy.select_variable(&mut context));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let mut state = State::default();
        let x = state.new_interval_variable(10, 10);
        let y = state.new_interval_variable(20, 20);

        let mut strategy = FirstFail::new(&[x, y]);
        let mut context = SelectionContext::new(&state);

        assert!(strategy.select_variable(&mut context).is_none());
    }
}
