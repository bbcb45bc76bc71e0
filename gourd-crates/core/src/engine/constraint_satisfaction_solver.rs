//! Houses the solver which attempts to find a solution to a constraint satisfaction problem by
//! depth-first search over [`ChoicePoint`]s, propagating to a fixed point after every decision.

use std::fmt::Debug;
use std::fmt::Formatter;
use std::time::Instant;

use log::debug;
use log::trace;

use super::search::SearchFrame;
use super::search::SearchStep;
use super::search::SearchTracer;
use super::search::SilentTracer;
use super::solver_statistics::SolverStatistics;
use crate::basic_types::CSPSolverExecutionFlag;
use crate::basic_types::Contradiction;
use crate::basic_types::DeclarationError;
use crate::basic_types::PropagationStatusCP;
use crate::basic_types::SolutionReference;
use crate::branching::Brancher;
#[cfg(doc)]
use crate::branching::ChoicePoint;
use crate::branching::SelectionContext;
use crate::engine::predicates::Predicate;
use crate::engine::termination::TerminationCondition;
use crate::engine::State;
use crate::gourd_assert_simple;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;
use crate::statistics::should_log_statistics;
use crate::statistics::Statistic;
use crate::statistics::StatisticLogger;
#[cfg(doc)]
use crate::Solver;

/// The order in which propagators of the same priority are taken from the propagation queue.
///
/// Propagation reaches the same fixed point for every order; the order only influences how much
/// work it takes to get there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueueOrder {
    /// The propagator which was enqueued first runs first.
    #[default]
    Fifo,
    /// The propagator which was enqueued last runs first.
    Lifo,
    /// A random enqueued propagator runs first, drawn from a generator seeded with `seed`.
    Random { seed: u64 },
}

/// Engine settings chosen when the [`Solver`] is created.
#[derive(Debug, Clone, Copy)]
pub struct SolverOptions {
    /// The order in which enqueued propagators are run.
    pub queue_order: QueueOrder,
    /// The tolerance used when comparing the bounds of real variables.
    pub real_precision: f64,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            queue_order: QueueOrder::default(),
            real_precision: 1e-6,
        }
    }
}

/// A solver which attempts to find a solution to a constraint satisfaction problem using
/// depth-first search with chronological backtracking.
///
/// The solver does not learn from failures; after a contradiction it restores the state to the
/// checkpoint of the innermost choice point with untried alternatives and tries the next one.
pub(crate) struct ConstraintSatisfactionSolver {
    /// The variables and propagators of the problem.
    pub(crate) state: State,
    /// The open choice points, from the root downwards.
    frames: Vec<SearchFrame>,
    /// Set once a contradiction is found at the root; nothing can be solved afterwards.
    is_infeasible: bool,
    /// Search counters; see [`SolverStatistics`].
    counters: SolverStatistics,
    /// Fixed for the lifetime of the solver.
    internal_parameters: SolverOptions,
    /// Receives the events of the search.
    tracer: Box<dyn SearchTracer>,
}

impl Debug for ConstraintSatisfactionSolver {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConstraintSatisfactionSolver")
            .field("state", &self.state)
            .field("frames", &self.frames)
            .field("is_infeasible", &self.is_infeasible)
            .field("counters", &self.counters)
            .field("internal_parameters", &self.internal_parameters)
            .finish()
    }
}

impl Default for ConstraintSatisfactionSolver {
    fn default() -> Self {
        ConstraintSatisfactionSolver::new(SolverOptions::default())
    }
}

impl ConstraintSatisfactionSolver {
    pub(crate) fn new(solver_options: SolverOptions) -> Self {
        ConstraintSatisfactionSolver {
            state: State::new(solver_options.queue_order),
            frames: vec![],
            is_infeasible: false,
            counters: SolverStatistics::default(),
            internal_parameters: solver_options,
            tracer: Box::new(SilentTracer),
        }
    }

    pub(crate) fn options(&self) -> &SolverOptions {
        &self.internal_parameters
    }

    pub(crate) fn set_tracer(&mut self, tracer: Box<dyn SearchTracer>) {
        self.tracer = tracer;
    }

    pub(crate) fn is_infeasible(&self) -> bool {
        self.is_infeasible
    }

    pub(crate) fn statistics(&self) -> SolverStatistics {
        SolverStatistics {
            num_propagations: self.state.num_propagator_calls(),
            ..self.counters
        }
    }

    pub(crate) fn log_statistics(&self, verbose: bool) {
        // Avoids visiting every propagator when nothing would be written.
        if should_log_statistics() {
            self.statistics().log(StatisticLogger::default());
            self.state.log_statistics(verbose);
        }
    }

    pub(crate) fn get_solution_reference(&self) -> SolutionReference<'_> {
        SolutionReference::new(&self.state.assignments)
    }
}

// Modelling.
impl ConstraintSatisfactionSolver {
    /// Adds a propagator and propagates the root to a fixed point.
    pub(crate) fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, DeclarationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        if self.is_infeasible {
            return Err(DeclarationError::InfeasibleState);
        }
        gourd_assert_simple!(self.state.get_checkpoint() == 0);

        let handle = self.state.add_propagator(constructor);
        self.propagate_root()?;

        Ok(handle)
    }

    /// Makes `predicate` hold at the root.
    pub(crate) fn post_at_root(&mut self, predicate: Predicate) -> Result<(), DeclarationError> {
        if self.is_infeasible {
            return Err(DeclarationError::InfeasibleState);
        }
        gourd_assert_simple!(self.state.get_checkpoint() == 0);

        if self.state.post(predicate).is_err() {
            self.is_infeasible = true;
            return Err(DeclarationError::InfeasibleConstraint);
        }
        self.propagate_root()
    }

    fn propagate_root(&mut self) -> Result<(), DeclarationError> {
        match self.state.propagate_to_fixed_point() {
            Ok(()) => Ok(()),
            Err(contradiction) => {
                debug!("The root is infeasible: {contradiction}");
                self.is_infeasible = true;
                Err(DeclarationError::InfeasibleConstraint)
            }
        }
    }
}

// Search.
impl ConstraintSatisfactionSolver {
    pub(crate) fn solve(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        self.solve_under_assumptions(&[], termination, brancher)
    }

    /// Searches for a solution in which all the `assumptions` hold.
    ///
    /// The assumptions are posted on their own checkpoint above the root, so they are undone by
    /// [`ConstraintSatisfactionSolver::restore_state_at_root`].
    pub(crate) fn solve_under_assumptions(
        &mut self,
        assumptions: &[Predicate],
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        if self.is_infeasible {
            return CSPSolverExecutionFlag::Infeasible;
        }

        let start_time = Instant::now();

        self.restore_state_at_root(brancher);
        let result = match self.initialise(assumptions) {
            Ok(()) => self.solve_internal(termination, brancher),
            Err(contradiction) => {
                debug!("The assumptions are infeasible: {contradiction}");
                self.tracer.on_failure(0);
                CSPSolverExecutionFlag::Infeasible
            }
        };

        if result == CSPSolverExecutionFlag::Infeasible && assumptions.is_empty() {
            self.is_infeasible = true;
        }

        self.counters.time_spent_in_solver += start_time.elapsed().as_millis() as u64;

        result
    }

    /// Continues the search after a solution was found, looking for the next solution in the
    /// remaining part of the search tree.
    pub(crate) fn find_next_solution(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        let start_time = Instant::now();

        let result = match self.next_alternative(termination, brancher) {
            SearchStep::Descended => self.solve_internal(termination, brancher),
            SearchStep::Exhausted => CSPSolverExecutionFlag::Infeasible,
            SearchStep::Stopped => CSPSolverExecutionFlag::Timeout,
        };

        self.counters.time_spent_in_solver += start_time.elapsed().as_millis() as u64;

        result
    }

    /// Undoes all decisions and assumptions, leaving the solver ready to accept new variables and
    /// propagators.
    pub(crate) fn restore_state_at_root(&mut self, brancher: &mut impl Brancher) {
        self.frames.clear();
        if self.state.get_checkpoint() != 0 {
            self.state.restore_to(0);
            brancher.synchronise(&self.state.assignments);
        }
    }

    fn initialise(&mut self, assumptions: &[Predicate]) -> PropagationStatusCP {
        self.state.new_checkpoint();
        for &assumption in assumptions {
            let _ = self.state.post(assumption)?;
        }
        self.state.propagate_to_fixed_point()
    }

    /// Explores the search tree below the current node, which has been propagated to a fixed
    /// point, until a solution is found or the tree is exhausted.
    fn solve_internal(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> CSPSolverExecutionFlag {
        loop {
            if termination.should_stop() {
                return CSPSolverExecutionFlag::Timeout;
            }

            let choice_point = brancher.next_choice_point(&mut SelectionContext::new(&self.state));

            let Some(choice_point) = choice_point else {
                self.on_solution(termination, brancher);
                return CSPSolverExecutionFlag::Feasible;
            };

            self.counters.num_choice_points += 1;
            termination.decision_has_been_made();
            self.tracer
                .on_choice_point(self.frames.len(), &choice_point);

            self.frames
                .push(SearchFrame::new(self.state.get_checkpoint(), choice_point));

            match self.next_alternative(termination, brancher) {
                SearchStep::Descended => {}
                SearchStep::Exhausted => return CSPSolverExecutionFlag::Infeasible,
                SearchStep::Stopped => return CSPSolverExecutionFlag::Timeout,
            }
        }
    }

    /// Tries the untried alternatives of the open choice points, innermost first, until one of
    /// them propagates without a contradiction.
    fn next_alternative(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) -> SearchStep {
        loop {
            let Some(frame) = self.frames.last_mut() else {
                return SearchStep::Exhausted;
            };

            if frame.is_exhausted() {
                let _ = self.frames.pop();
                brancher.on_backtrack();
                self.tracer.on_backtrack(self.frames.len());
                continue;
            }

            let alternative = frame.choice_point.alternatives()[frame.next_alternative];
            frame.next_alternative += 1;
            let checkpoint = frame.checkpoint;

            if termination.should_stop() {
                return SearchStep::Stopped;
            }

            if self.state.get_checkpoint() > checkpoint {
                self.state.restore_to(checkpoint);
                brancher.synchronise(&self.state.assignments);
            }

            self.state.new_checkpoint();
            self.counters.peak_depth = self.counters.peak_depth.max(self.frames.len() as u64);

            trace!("Trying {alternative} at depth {}", self.frames.len());
            match self.post_and_propagate(alternative) {
                Ok(()) => return SearchStep::Descended,
                Err(contradiction) => {
                    trace!("{alternative} failed: {contradiction}");
                    self.counters.num_failures += 1;
                    brancher.on_conflict();
                    self.tracer.on_failure(self.frames.len());
                }
            }
        }
    }

    fn post_and_propagate(&mut self, predicate: Predicate) -> PropagationStatusCP {
        let _ = self.state.post(predicate).map_err(Contradiction::from)?;
        self.state.propagate_to_fixed_point()
    }

    fn on_solution(
        &mut self,
        termination: &mut impl TerminationCondition,
        brancher: &mut impl Brancher,
    ) {
        self.counters.num_solutions += 1;
        termination.solution_has_been_found();

        let solution = SolutionReference::new(&self.state.assignments);
        brancher.on_solution(solution);
        self.tracer.on_solution(solution);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
    use crate::branching::value_selection::InDomainMin;
    use crate::branching::variable_selection::InputOrder;
    use crate::engine::termination::Indefinite;
    use crate::engine::variables::DomainId;
    use crate::predicate;
    use crate::propagation::ReadDomains;

    fn brancher(
        variables: &[DomainId],
    ) -> IndependentVariableValueBrancher<DomainId, InputOrder<DomainId>, InDomainMin> {
        IndependentVariableValueBrancher::new(InputOrder::new(variables), InDomainMin)
    }

    #[test]
    fn a_solution_fixes_all_branched_variables() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.new_interval_variable(0, 3);
        let y = solver.state.new_interval_variable(2, 5);

        let flag = solver.solve(&mut Indefinite, &mut brancher(&[x, y]));

        assert_eq!(CSPSolverExecutionFlag::Feasible, flag);
        assert_eq!(0, solver.state.lower_bound(&x));
        assert_eq!(2, solver.state.upper_bound(&y));
    }

    #[test]
    fn every_solution_is_enumerated_once() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.new_interval_variable(0, 2);
        let y = solver.state.new_interval_variable(0, 1);
        let mut brancher = brancher(&[x, y]);

        let mut solutions = vec![];
        let mut flag = solver.solve(&mut Indefinite, &mut brancher);
        while flag == CSPSolverExecutionFlag::Feasible {
            solutions.push((solver.state.lower_bound(&x), solver.state.lower_bound(&y)));
            flag = solver.find_next_solution(&mut Indefinite, &mut brancher);
        }

        assert_eq!(CSPSolverExecutionFlag::Infeasible, flag);
        assert_eq!(
            vec![(0, 0), (0, 1), (1, 0), (1, 1), (2, 0), (2, 1)],
            solutions
        );
    }

    #[test]
    fn assumptions_are_undone_at_the_root() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.new_interval_variable(0, 5);
        let mut brancher = brancher(&[x]);

        let flag = solver.solve_under_assumptions(&[predicate![x >= 3]], &mut Indefinite, &mut brancher);
        assert_eq!(CSPSolverExecutionFlag::Feasible, flag);
        assert_eq!(3, solver.state.lower_bound(&x));

        solver.restore_state_at_root(&mut brancher);
        assert_eq!(0, solver.state.lower_bound(&x));
        assert_eq!(5, solver.state.upper_bound(&x));
    }

    #[test]
    fn infeasible_assumptions_do_not_make_the_solver_infeasible() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.new_interval_variable(0, 5);
        let mut brancher = brancher(&[x]);

        let flag = solver.solve_under_assumptions(&[predicate![x >= 6]], &mut Indefinite, &mut brancher);

        assert_eq!(CSPSolverExecutionFlag::Infeasible, flag);
        assert!(!solver.is_infeasible());
        assert_eq!(
            CSPSolverExecutionFlag::Feasible,
            solver.solve(&mut Indefinite, &mut brancher)
        );
    }

    #[test]
    fn statistics_count_choice_points_and_solutions() {
        let mut solver = ConstraintSatisfactionSolver::default();
        let x = solver.state.new_interval_variable(0, 1);

        let _ = solver.solve(&mut Indefinite, &mut brancher(&[x]));

        let statistics = solver.statistics();
        assert_eq!(1, statistics.num_choice_points);
        assert_eq!(1, statistics.num_solutions);
        assert_eq!(0, statistics.num_failures);
        assert_eq!(1, statistics.peak_depth);
    }
}
