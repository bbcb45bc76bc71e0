use crate::branching::value_selection::ValueSelector;
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::engine::variables::IntegerVariable;
use crate::predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which creates one alternative per value in the domain, assigning the
/// variable to each value in increasing order.
#[derive(Debug, Copy, Clone)]
pub struct InDomainEnumerate;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainEnumerate {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> ChoicePoint {
        let alternatives = context
            .iterate_domain(&decision_variable)
            .map(|value| predicate![decision_variable == value])
            .collect();

        ChoicePoint::new(alternatives)
    }
}
