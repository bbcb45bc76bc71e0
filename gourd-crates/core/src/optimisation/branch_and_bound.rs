use std::ops::ControlFlow;

use log::debug;
use log::info;

use super::solution_callback::SolutionCallback;
use super::OptimisationProcedure;
use crate::branching::Brancher;
use crate::optimisation::OptimisationDirection;
use crate::predicate;
use crate::predicates::Predicate;
use crate::results::OptimisationResult;
use crate::results::ProblemSolution;
use crate::results::SatisfactionResult;
use crate::results::Solution;
use crate::termination::TerminationCondition;
use crate::variables::IntegerVariable;
use crate::Solver;

/// Implements branch-and-bound optimisation.
///
/// The procedure first finds any solution. Every following search restarts from the root with the
/// assumption that the objective is strictly better than the incumbent; once such a search
/// proves that no better solution exists, or the incumbent is at the end of the `i32` range, the
/// incumbent is optimal. If the
/// [`TerminationCondition`] triggers before that, the incumbent is returned as a best-effort
/// [`OptimisationResult::Satisfiable`].
#[derive(Debug, Clone, Copy)]
pub struct BranchAndBound<Var, Callback> {
    direction: OptimisationDirection,
    objective: Var,
    solution_callback: Callback,
}

impl<Var, Callback> BranchAndBound<Var, Callback> {
    /// Create a new instance of [`BranchAndBound`].
    pub fn new(
        direction: OptimisationDirection,
        objective: Var,
        solution_callback: Callback,
    ) -> Self {
        Self {
            direction,
            objective,
            solution_callback,
        }
    }

    /// The bound which a solution has to satisfy to improve on an objective value of `value`, or
    /// `None` if no value of the objective is better.
    fn improvement_on(&self, value: i32) -> Option<Predicate>
    where
        Var: IntegerVariable,
    {
        let objective = &self.objective;
        match self.direction {
            OptimisationDirection::Minimise => value
                .checked_sub(1)
                .map(|bound| predicate![objective <= bound]),
            OptimisationDirection::Maximise => value
                .checked_add(1)
                .map(|bound| predicate![objective >= bound]),
        }
    }

    fn run_optimisation<B>(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        solver: &mut Solver,
        mut best_solution: Solution,
    ) -> OptimisationResult
    where
        Var: IntegerVariable,
        Callback: SolutionCallback<B>,
        B: Brancher,
    {
        loop {
            let best_objective_value = best_solution.get_integer_value(self.objective.clone());
            info!("Found a solution with objective value {best_objective_value}");

            let callback_result =
                self.solution_callback
                    .on_solution_callback(solver, best_solution.as_reference(), brancher);
            if callback_result.is_break() {
                return OptimisationResult::Satisfiable(best_solution);
            }

            let Some(improvement) = self.improvement_on(best_objective_value) else {
                debug!("The objective is at the end of its value range");
                return OptimisationResult::Optimal(best_solution);
            };

            debug!("Restarting with the bound {improvement:?}");
            match solver.satisfy_under_assumptions(brancher, termination, &[improvement]) {
                SatisfactionResult::Satisfiable(solution) => best_solution = solution,
                SatisfactionResult::Unsatisfiable => {
                    return OptimisationResult::Optimal(best_solution)
                }
                SatisfactionResult::Unknown => {
                    return OptimisationResult::Satisfiable(best_solution)
                }
            }
        }
    }
}

impl<Var, Callback, B> OptimisationProcedure<B, Callback> for BranchAndBound<Var, Callback>
where
    Var: IntegerVariable,
    B: Brancher,
    Callback: SolutionCallback<B>,
{
    fn optimise(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        solver: &mut Solver,
    ) -> OptimisationResult {
        // First we solve the satisfaction problem without constraining the objective.
        let initial_solution = match solver.satisfy(brancher, termination) {
            SatisfactionResult::Satisfiable(solution) => solution,
            SatisfactionResult::Unsatisfiable => return OptimisationResult::Unsatisfiable,
            SatisfactionResult::Unknown => return OptimisationResult::Unknown,
        };

        self.run_optimisation(brancher, termination, solver, initial_solution)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints;
    use crate::results::SolutionReference;
    use crate::termination::DecisionBudget;
    use crate::termination::Indefinite;
    use crate::DefaultBrancher;

    fn callback(
        callback: impl FnMut(&Solver, SolutionReference<'_>, &DefaultBrancher) -> ControlFlow<()>,
    ) -> impl SolutionCallback<DefaultBrancher> {
        callback
    }

    #[test]
    fn the_incumbent_is_reported_to_the_callback() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 5).expect("non-empty");
        let y = solver.new_bounded_integer(0, 5).expect("non-empty");
        solver
            .add_constraint(constraints::greater_than_or_equals([x, y], 4))
            .expect("feasible");

        let mut values = vec![];
        let mut brancher = solver.default_brancher();
        let result = solver.optimise(
            &mut brancher,
            &mut Indefinite,
            BranchAndBound::new(
                OptimisationDirection::Minimise,
                x,
                callback(|solver, solution, _| {
                    values.push(solution.get_integer_value(x));
                    assert_eq!(solver.lower_bound(&x), 0, "the solver is at the root");
                    ControlFlow::Continue(())
                }),
            ),
        );

        let OptimisationResult::Optimal(solution) = result else {
            panic!("the problem is feasible");
        };
        assert_eq!(solution.get_integer_value(x), 0);
        assert_eq!(values.last(), Some(&0));
        assert!(values.windows(2).all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn breaking_from_the_callback_returns_the_incumbent() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 5).expect("non-empty");

        let mut brancher = solver.default_brancher();
        let result = solver.optimise(
            &mut brancher,
            &mut Indefinite,
            BranchAndBound::new(
                OptimisationDirection::Maximise,
                x,
                callback(|_, _, _| ControlFlow::Break(())),
            ),
        );

        assert!(matches!(result, OptimisationResult::Satisfiable(_)));
    }

    #[test]
    fn an_exhausted_budget_without_a_solution_is_unknown() {
        let mut solver = Solver::default();
        let x = solver.new_bounded_integer(0, 5).expect("non-empty");

        let mut brancher = solver.default_brancher();
        let result = solver.minimise(&mut brancher, &mut DecisionBudget::new(0), x);

        assert!(matches!(result, OptimisationResult::Unknown));
    }

    #[test]
    fn objectives_at_the_end_of_the_value_range_are_optimal() {
        let mut solver = Solver::default();
        let low = solver
            .new_bounded_integer(i32::MIN, i32::MIN + 1)
            .expect("non-empty");
        let high = solver
            .new_bounded_integer(i32::MAX - 1, i32::MAX)
            .expect("non-empty");

        let mut brancher = solver.default_brancher();
        let OptimisationResult::Optimal(solution) =
            solver.minimise(&mut brancher, &mut Indefinite, low)
        else {
            panic!("the problem is feasible");
        };
        assert_eq!(solution.get_integer_value(low), i32::MIN);

        let OptimisationResult::Optimal(solution) =
            solver.maximise(&mut brancher, &mut Indefinite, high)
        else {
            panic!("the problem is feasible");
        };
        assert_eq!(solution.get_integer_value(high), i32::MAX);

        let OptimisationResult::Optimal(solution) =
            solver.maximise(&mut brancher, &mut Indefinite, low)
        else {
            panic!("the problem is feasible");
        };
        assert_eq!(solution.get_integer_value(low), i32::MIN + 1);
    }
}
