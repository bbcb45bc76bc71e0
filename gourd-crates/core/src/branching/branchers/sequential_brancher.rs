//! A [`Brancher`] which composes other branchers in sequence.

use crate::basic_types::SolutionReference;
use crate::branching::Brancher;
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::engine::cp::Assignments;
use crate::statistics::StatisticLogger;

/// Branches with the first of its branchers which still has a decision to make.
///
/// The search only reaches a solution once all the branchers are done, which makes this the
/// conjunction of the strategies: e.g. first fix all integer variables and then decide all set
/// variables.
#[derive(Default)]
pub struct SequentialBrancher {
    branchers: Vec<Box<dyn Brancher>>,
}

impl std::fmt::Debug for SequentialBrancher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequentialBrancher")
            .field("num_branchers", &self.branchers.len())
            .finish()
    }
}

impl SequentialBrancher {
    pub fn new(branchers: Vec<Box<dyn Brancher>>) -> Self {
        SequentialBrancher { branchers }
    }

    /// Adds a brancher which is asked for a choice point after all the current ones are done.
    pub fn add_brancher(&mut self, brancher: Box<dyn Brancher>) {
        self.branchers.push(brancher);
    }
}

impl Brancher for SequentialBrancher {
    fn log_statistics(&self, statistic_logger: StatisticLogger) {
        for (index, brancher) in self.branchers.iter().enumerate() {
            brancher.log_statistics(statistic_logger.attach_to_prefix(index));
        }
    }

    fn next_choice_point(&mut self, context: &mut SelectionContext) -> Option<ChoicePoint> {
        self.branchers
            .iter_mut()
            .find_map(|brancher| brancher.next_choice_point(context))
    }

    fn on_conflict(&mut self) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_conflict());
    }

    fn on_backtrack(&mut self) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_backtrack());
    }

    fn on_solution(&mut self, solution: SolutionReference) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.on_solution(solution));
    }

    fn synchronise(&mut self, assignments: &Assignments) {
        self.branchers
            .iter_mut()
            .for_each(|brancher| brancher.synchronise(assignments));
    }
}
