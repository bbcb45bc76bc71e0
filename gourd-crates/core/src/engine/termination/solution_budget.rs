use super::TerminationCondition;

/// A [`TerminationCondition`] which triggers once the solver has found a given number of
/// solutions.
#[derive(Debug, Copy, Clone)]
pub struct SolutionBudget {
    budget: u64,
    num_solutions: u64,
}

impl SolutionBudget {
    pub fn new(budget: u64) -> Self {
        Self {
            budget,
            num_solutions: 0,
        }
    }
}

impl TerminationCondition for SolutionBudget {
    fn should_stop(&mut self) -> bool {
        self.num_solutions >= self.budget
    }

    fn solution_has_been_found(&mut self) {
        self.num_solutions += 1;
    }
}
