use crate::branching::value_selection::ValueSelector;
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::engine::variables::IntegerVariable;
use crate::predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which first tries to assign the variable to its lower bound, and
/// otherwise removes the lower bound from the domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainMin;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainMin {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> ChoicePoint {
        let lower_bound = context.lower_bound(&decision_variable);
        ChoicePoint::binary(predicate![decision_variable <= lower_bound])
    }
}
