use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;

/// A trait containing the interface for [`ValueSelector`]s, specifying the appropriate hooks into
/// the solver and the methods required for selecting a value for a given variable.
pub trait ValueSelector<Var> {
    /// Determines how to split the domain of `decision_variable`, which is guaranteed not to be
    /// fixed.
    fn select_value(
        &mut self,
        context: &mut SelectionContext,
        decision_variable: Var,
    ) -> ChoicePoint;

    /// A function which is called after an alternative of a choice point failed.
    fn on_conflict(&mut self) {}
}
