use crate::basic_types::SolutionReference;
#[cfg(doc)]
use crate::branching;
#[cfg(doc)]
use crate::branching::value_selection::ValueSelector;
#[cfg(doc)]
use crate::branching::variable_selection::VariableSelector;
use crate::branching::SelectionContext;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::cp::Assignments;
use crate::engine::predicates::Predicate;
use crate::gourd_assert_simple;
use crate::statistics::StatisticLogger;
#[cfg(doc)]
use crate::Solver;

/// A trait for defining a branching strategy (oftentimes utilising a [`VariableSelector`] and a
/// [`ValueSelector`]).
///
/// In general, implementations of this trait define how the search of the solver proceeds (i.e.
/// it controls how the solver determines which part of the search space to explore). Every
/// alternative of a returned [`ChoicePoint`] should create a smaller domain for at least one of
/// the variables, and together the alternatives should cover every solution below the current
/// node. See [`branching`] for example usages.
///
/// If the [`Brancher`] (or any component thereof) is implemented incorrectly then the behaviour
/// of the solver is undefined.
pub trait Brancher {
    /// Logs statistics of the brancher using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}

    /// Returns the next [`ChoicePoint`] (or [`None`] if all variables under consideration are
    /// fixed, in which case the current node is a solution).
    ///
    /// Note that this method **cannot** apply the decision itself, it should only return the
    /// alternatives which the search will try in order.
    fn next_choice_point(&mut self, context: &mut SelectionContext) -> Option<ChoicePoint>;

    /// Called after an alternative of a choice point failed.
    fn on_conflict(&mut self) {}

    /// Called whenever the search backtracks to an earlier choice point.
    fn on_backtrack(&mut self) {}

    /// Called when a solution is found; this is either a new incumbent during optimisation or the
    /// next solution when enumerating all solutions.
    fn on_solution(&mut self, _solution: SolutionReference) {}

    /// Called after backtracking, to reset internal data structures to the restored domains.
    fn synchronise(&mut self, _assignments: &Assignments) {}
}

impl<T: Brancher> Brancher for Option<T> {
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        if let Some(brancher) = self {
            brancher.log_statistics(statistic_logger)
        }
    }

    fn next_choice_point(&mut self, context: &mut SelectionContext) -> Option<ChoicePoint> {
        self.as_mut()
            .and_then(|brancher| brancher.next_choice_point(context))
    }

    fn on_conflict(&mut self) {
        if let Some(brancher) = self {
            brancher.on_conflict()
        }
    }

    fn on_backtrack(&mut self) {
        if let Some(brancher) = self {
            brancher.on_backtrack()
        }
    }

    fn on_solution(&mut self, solution: SolutionReference) {
        if let Some(brancher) = self {
            brancher.on_solution(solution)
        }
    }

    fn synchronise(&mut self, assignments: &Assignments) {
        if let Some(brancher) = self {
            brancher.synchronise(assignments)
        }
    }
}

impl<T: Brancher + ?Sized> Brancher for Box<T> {
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        self.as_ref().log_statistics(statistic_logger)
    }

    fn next_choice_point(&mut self, context: &mut SelectionContext) -> Option<ChoicePoint> {
        self.as_mut().next_choice_point(context)
    }

    fn on_conflict(&mut self) {
        self.as_mut().on_conflict()
    }

    fn on_backtrack(&mut self) {
        self.as_mut().on_backtrack()
    }

    fn on_solution(&mut self, solution: SolutionReference) {
        self.as_mut().on_solution(solution)
    }

    fn synchronise(&mut self, assignments: &Assignments) {
        self.as_mut().synchronise(assignments)
    }
}

/// A node of the search tree: the ordered alternatives which are tried one after the other until
/// one of them leads to a solution.
///
/// Posting an alternative must narrow at least one domain, and the alternatives together must not
/// exclude any solution of the current node.
#[derive(Clone, Debug, PartialEq)]
pub struct ChoicePoint {
    alternatives: Vec<Predicate>,
}

impl ChoicePoint {
    /// Creates a choice point trying the `alternatives` in the given order.
    ///
    /// Panics if there are no alternatives.
    pub fn new(alternatives: Vec<Predicate>) -> ChoicePoint {
        gourd_assert_simple!(
            !alternatives.is_empty(),
            "A choice point requires at least one alternative"
        );
        ChoicePoint { alternatives }
    }

    /// The choice point `[decision, !decision]`.
    pub fn binary(decision: Predicate) -> ChoicePoint {
        ChoicePoint {
            alternatives: vec![decision, !decision],
        }
    }

    pub fn alternatives(&self) -> &[Predicate] {
        &self.alternatives
    }

    pub fn num_alternatives(&self) -> usize {
        self.alternatives.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::DomainId;
    use crate::predicate;

    #[test]
    fn binary_choice_point_tries_the_negation_second() {
        let x = DomainId::new(0);

        let choice_point = ChoicePoint::binary(predicate![x <= 3]);

        assert_eq!(
            &[predicate![x <= 3], predicate![x >= 4]],
            choice_point.alternatives()
        );
    }

    #[test]
    #[should_panic]
    fn choice_point_without_alternatives_is_rejected() {
        let _ = ChoicePoint::new(vec![]);
    }
}
