use log::warn;

use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
use crate::engine::variables::IntegerVariable;
use crate::propagation::ReadDomains;

/// A [`VariableSelector`] which selects the first variable which is not fixed given the order in
/// the provided list.
#[derive(Debug, Clone)]
pub struct InputOrder<Var> {
    variables: Vec<Var>,
}

impl<Var: Clone> InputOrder<Var> {
    pub fn new(variables: &[Var]) -> Self {
        if variables.is_empty() {
            warn!("The InputOrder variable selector was not provided with any variables");
        }
        InputOrder {
            variables: variables.to_vec(),
        }
    }
}

impl<Var: IntegerVariable> VariableSelector<Var> for InputOrder<Var> {
    fn select_variable(&mut self, context: &mut SelectionContext) -> Option<Var> {
        self.variables
            .iter()
            .find(|variable| !context.is_fixed(*variable))
            .cloned()
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

        let mut strategy = InputOrder::new(&[x, y]);
        {
            let mut context = SelectionContext::new(&state);
            assert_eq!(Some(x), strategy.select_variable(&mut context));
        }

        let _ = state.post(predicate![x == 0]).expect("value is in the domain");
        let mut context = SelectionContext::new(&state);
        assert_eq!(Some(y), strategy.select_variable(&mut context));
    }

    #[test]
    fn fixed_variables_are_not_selected() {
        let mut state = State::default();
        let x = state.new_interval_variable(1, 1);
        let y = state.new_interval_variable(2, 2);

        let mut strategy = InputOrder::new(&[x, y]);
        let mut context = SelectionContext::new(&state);

        assert!(strategy.select_variable(&mut context).is_none());
    }
}
