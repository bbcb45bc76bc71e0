use crate::branching::value_selection::ValueSelector;
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::engine::variables::IntegerVariable;
use crate::gourd_assert_advanced;
use crate::predicate;
use crate::propagation::ReadDomains;

/// A [`ValueSelector`] which splits the domain in half (based on the lower-bound and upper-bound,
/// disregarding holes) and first explores the lower half.
///
/// Note that this strategy will not necessarily result in an equal split if there are holes in the
/// domain.
#[derive(Debug, Copy, Clone)]
pub struct InDomainSplit;

impl<Var: IntegerVariable> ValueSelector<Var> for InDomainSplit {
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> ChoicePoint {
        let lower_bound = context.lower_bound(&decision_variable);
        let upper_bound = context.upper_bound(&decision_variable);

        // The variable is not fixed, so the bound lies in [lower_bound, upper_bound).
        let bound = (lower_bound as i64 + (upper_bound as i64 - lower_bound as i64) / 2) as i32;
        gourd_assert_advanced!(
            lower_bound <= bound && bound < upper_bound,
            "It should hold that {lower_bound} <= {bound} < {upper_bound}"
        );

        ChoicePoint::binary(predicate![decision_variable <= bound])
    }
}
