use crate::branching::value_selection::ValueSelector;
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::engine::variables::IntegerVariable;
use crate::predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which first tries to assign the variable to its upper bound, and
/// otherwise removes the upper bound from the domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMax;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMax {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> ChoicePoint {
        let upper_bound = context.upper_bound(&decision_variable);
        ChoicePoint::binary(predicate![decision_variable >= upper_bound])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::State;

    #[test]
    fn test_returns_correct_choice_point() {
        let mut state = State::default();
        let x = state.new_interval_variable(0, 10);
        let mut context = SelectionContext::new(&state);

        let choice_point = InDomainMax.select_value(&mut context, x);

        assert_eq!(
            &[predicate![x >= 10], predicate![x <= 9]],
            choice_point.alternatives()
        );
    }
}
