use itertools::Itertools;
use log::info;

use super::outputs::solution_iterator::IteratedSolution;
use super::outputs::solution_iterator::SolutionIterator;
use super::outputs::AllSolutions;
use super::outputs::OptimisationResult;
use super::outputs::SatisfactionResult;
use crate::basic_types::CSPSolverExecutionFlag;
use crate::basic_types::DeclarationError;
use crate::basic_types::Solution;
use crate::basic_types::SolutionReference;
use crate::branching::branchers::independent_variable_value_brancher::IndependentVariableValueBrancher;
use crate::branching::branchers::real_split_brancher::RealSplitBrancher;
use crate::branching::branchers::sequential_brancher::SequentialBrancher;
use crate::branching::branchers::set_element_brancher::SetElementBrancher;
use crate::branching::value_selection::InDomainMin;
use crate::branching::variable_selection::FirstFail;
use crate::branching::Brancher;
use crate::constraints::Constraint;
use crate::engine::domains::BitSetDomain;
use crate::engine::domains::Domain;
use crate::engine::domains::IntegerDomain;
use crate::engine::domains::IntervalDomain;
use crate::engine::domains::RealDomain;
use crate::engine::domains::SetDomain;
use crate::engine::predicates::Predicate;
use crate::engine::search::SearchTracer;
use crate::engine::termination::TerminationCondition;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::engine::variables::RealVariable;
use crate::engine::variables::SetVariable;
use crate::engine::ConstraintSatisfactionSolver;
use crate::engine::SolverOptions;
use crate::engine::SolverStatistics;
use crate::optimisation::branch_and_bound::BranchAndBound;
use crate::optimisation::solution_callback::NoCallback;
use crate::optimisation::solution_callback::SolutionCallback;
use crate::optimisation::OptimisationDirection;
use crate::optimisation::OptimisationProcedure;
use crate::propagation::PropagatorConstructor;
use crate::propagation::PropagatorHandle;
use crate::propagation::ReadDomains;
use crate::statistics::log_statistic_postfix;

/// A model together with the engine which solves it: variables are created on it, constraints are
/// added to it, and it is then asked for one solution, all solutions or an optimum.
///
/// # Creating Variables
/// Integer variables are [`DomainId`]s which can be wrapped into views (see
/// [`crate::variables::TransformableVariable`]), set variables are [`SetVariable`]s and real
/// variables are [`RealVariable`]s.
///
/// ```rust
/// # use gourd_core::Solver;
/// # use gourd_core::variables::TransformableVariable;
/// let mut solver = Solver::default();
///
/// // An integer variable with a domain in the range [0, 10]
/// let integer_between_bounds = solver.new_bounded_integer(0, 10).unwrap();
///
/// // An integer variable with a non-continuous domain
/// let sparse_integer = solver.new_sparse_integer(vec![0, 3, 5]).unwrap();
///
/// // An affine view over a variable with both a scale and an offset
/// let view_over_integer = integer_between_bounds.scaled(-1).offset(15);
///
/// // A set variable which contains 1 and may contain 2 and 3
/// let set = solver.new_set_variable([1], [1, 2, 3]).unwrap();
///
/// // A real variable in the range [0.0, 1.5]
/// let real = solver.new_real_variable(0.0, 1.5).unwrap();
/// ```
///
/// # Using the Solver
/// Constraints are added through [`Solver::add_constraint`], with the builders in
/// [`crate::constraints`]. A problem is then solved with [`Solver::satisfy`],
/// [`Solver::all_solutions`], [`Solver::minimise`] or [`Solver::maximise`].
#[derive(Debug, Default)]
pub struct Solver {
    pub(crate) satisfaction_solver: ConstraintSatisfactionSolver,
}

impl Solver {
    /// The largest number of values [`Solver::new_bitset_integer`] accepts. Larger domains should
    /// be declared with [`Solver::new_bounded_integer`], whose size does not depend on the bounds.
    pub const MAX_BITSET_DOMAIN_SIZE: u64 = 1 << 24;

    /// An empty model whose engine is configured by `solver_options`.
    pub fn with_options(solver_options: SolverOptions) -> Self {
        Self {
            satisfaction_solver: ConstraintSatisfactionSolver::new(solver_options),
        }
    }

    /// The statistics gathered by the solver so far.
    pub fn statistics(&self) -> SolverStatistics {
        self.satisfaction_solver.statistics()
    }

    /// Logs the statistics currently present in the solver. If `verbose` is set, the statistics
    /// of every propagator are logged as well.
    pub fn log_statistics(&self, verbose: bool) {
        self.satisfaction_solver.log_statistics(verbose);
        log_statistic_postfix();
    }

    /// Replaces the [`SearchTracer`] which is notified of the events of the search.
    pub fn set_tracer(&mut self, tracer: impl SearchTracer + 'static) {
        self.satisfaction_solver.set_tracer(Box::new(tracer));
    }

    /// Whether the model was found to be infeasible at the root. Once this holds, every call to
    /// solve the model reports that it is unsatisfiable.
    pub fn is_infeasible(&self) -> bool {
        self.satisfaction_solver.is_infeasible()
    }

    pub(crate) fn get_solution_reference(&self) -> SolutionReference<'_> {
        self.satisfaction_solver.get_solution_reference()
    }
}

// Root domains.
impl Solver {
    /// The smallest value `variable` can take after root propagation.
    pub fn lower_bound(&self, variable: &impl IntegerVariable) -> i32 {
        self.satisfaction_solver.state.lower_bound(variable)
    }

    /// The largest value `variable` can take after root propagation.
    pub fn upper_bound(&self, variable: &impl IntegerVariable) -> i32 {
        self.satisfaction_solver.state.upper_bound(variable)
    }

    /// Get the values in the domain of the given [`IntegerVariable`] at the root level, in
    /// increasing order.
    pub fn domain_values(&self, variable: &impl IntegerVariable) -> Vec<i32> {
        self.satisfaction_solver
            .state
            .iterate_domain(variable)
            .sorted()
            .collect()
    }

    /// Get the elements which are definitely in `set` at the root level.
    pub fn glb(&self, set: SetVariable) -> &IntervalDomain {
        self.satisfaction_solver.state.glb(set)
    }

    /// Get the elements which may be in `set` at the root level.
    pub fn lub(&self, set: SetVariable) -> &IntervalDomain {
        self.satisfaction_solver.state.lub(set)
    }

    /// Get the domain of `real` at the root level.
    pub fn real_domain(&self, real: RealVariable) -> RealDomain {
        self.satisfaction_solver.state.real_domain(real)
    }
}

/// Functions to create variables.
impl Solver {
    /// Create a new integer variable with the given bounds, represented by a list of intervals.
    ///
    /// # Example
    /// ```rust
    /// # use gourd_core::Solver;
    /// # use gourd_core::DeclarationError;
    /// let mut solver = Solver::default();
    /// let x = solver.new_bounded_integer(0, 10).unwrap();
    ///
    /// assert_eq!(solver.lower_bound(&x), 0);
    /// assert_eq!(
    ///     solver.new_bounded_integer(5, 4),
    ///     Err(DeclarationError::EmptyDomain)
    /// );
    /// ```
    pub fn new_bounded_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, DeclarationError> {
        if lower_bound > upper_bound {
            return Err(DeclarationError::EmptyDomain);
        }

        let domain = IntegerDomain::Interval(IntervalDomain::new(lower_bound, upper_bound));
        Ok(self.new_variable(Domain::Integer(domain)))
    }

    /// Create a new integer variable with the given bounds, represented by a fixed-size bitset.
    /// This is most suitable for small domains in which many holes are expected.
    ///
    /// Fails with [`DeclarationError::DomainTooLarge`] if the bounds span more than
    /// [`Solver::MAX_BITSET_DOMAIN_SIZE`] values.
    pub fn new_bitset_integer(
        &mut self,
        lower_bound: i32,
        upper_bound: i32,
    ) -> Result<DomainId, DeclarationError> {
        if lower_bound > upper_bound {
            return Err(DeclarationError::EmptyDomain);
        }

        let size = u64::from(upper_bound.abs_diff(lower_bound)) + 1;
        if size > Self::MAX_BITSET_DOMAIN_SIZE {
            return Err(DeclarationError::DomainTooLarge {
                size,
                limit: Self::MAX_BITSET_DOMAIN_SIZE,
            });
        }

        let domain = IntegerDomain::BitSet(BitSetDomain::new(lower_bound, upper_bound));
        Ok(self.new_variable(Domain::Integer(domain)))
    }

    /// Create a new integer variable which has a domain of predefined values. Duplicates are
    /// ignored.
    pub fn new_sparse_integer(
        &mut self,
        values: impl IntoIterator<Item = i32>,
    ) -> Result<DomainId, DeclarationError> {
        let domain = IntervalDomain::from_values(values);
        if domain.is_empty() {
            return Err(DeclarationError::EmptyDomain);
        }

        Ok(self.new_variable(Domain::Integer(IntegerDomain::Interval(domain))))
    }

    /// Create a new set variable which contains at least the elements of `glb` and at most the
    /// elements of `lub`.
    ///
    /// Every element of `glb` has to be in `lub`, otherwise a
    /// [`DeclarationError::ValueOutsideDomain`] is returned.
    pub fn new_set_variable(
        &mut self,
        glb: impl IntoIterator<Item = i32>,
        lub: impl IntoIterator<Item = i32>,
    ) -> Result<SetVariable, DeclarationError> {
        let glb = IntervalDomain::from_values(glb);
        let lub = IntervalDomain::from_values(lub);

        if let Some(value) = glb.values().find(|&value| !lub.contains_value(value)) {
            return Err(DeclarationError::ValueOutsideDomain { value });
        }

        let domain_id = self.new_variable(Domain::Set(SetDomain::new(glb, lub)));
        Ok(SetVariable::new(domain_id))
    }

    /// Create a new real variable in `[lower_bound, upper_bound]`, compared with the precision
    /// from the [`SolverOptions`].
    pub fn new_real_variable(
        &mut self,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Result<RealVariable, DeclarationError> {
        let precision = self.satisfaction_solver.options().real_precision;
        if !(precision.is_finite() && precision > 0.0) {
            return Err(DeclarationError::InvalidPrecision);
        }
        if !(lower_bound.is_finite() && upper_bound.is_finite()) || lower_bound > upper_bound {
            return Err(DeclarationError::EmptyDomain);
        }

        let domain = RealDomain::new(lower_bound, upper_bound, precision);
        Ok(RealVariable::new(self.new_variable(Domain::Real(domain))))
    }

    fn new_variable(&mut self, domain: Domain) -> DomainId {
        self.satisfaction_solver.state.new_variable(domain)
    }
}

// Solving.
impl Solver {
    /// Searches for a single solution, stopping early when `termination` triggers.
    ///
    /// The solver is back at the root when this method returns, so constraints can be added
    /// afterwards.
    pub fn satisfy<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> SatisfactionResult {
        self.satisfy_under_assumptions(brancher, termination, &[])
    }

    /// Like [`Solver::satisfy`], but only solutions in which all `assumptions` hold count. The
    /// assumptions are undone when this method returns.
    pub fn satisfy_under_assumptions<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
        assumptions: &[Predicate],
    ) -> SatisfactionResult {
        let result = match self
            .satisfaction_solver
            .solve_under_assumptions(assumptions, termination, brancher)
        {
            CSPSolverExecutionFlag::Feasible => {
                let solution: Solution = self.get_solution_reference().into();
                SatisfactionResult::Satisfiable(solution)
            }
            CSPSolverExecutionFlag::Infeasible => SatisfactionResult::Unsatisfiable,
            CSPSolverExecutionFlag::Timeout => SatisfactionResult::Unknown,
        };

        // The model is left at the root for the next call.
        self.satisfaction_solver.restore_state_at_root(brancher);

        result
    }

    /// Returns a [`SolutionIterator`] which enumerates the solutions of the model one by one.
    pub fn get_solution_iterator<
        'this,
        'brancher,
        'termination,
        B: Brancher,
        T: TerminationCondition,
    >(
        &'this mut self,
        brancher: &'brancher mut B,
        termination: &'termination mut T,
    ) -> SolutionIterator<'this, 'brancher, 'termination, B, T> {
        SolutionIterator::new(self, brancher, termination)
    }

    /// Finds every solution of the model (projected on the variables the `brancher` fixes), or
    /// as many as possible before the [`TerminationCondition`] triggers.
    ///
    /// # Example
    /// ```rust
    /// # use gourd_core::Solver;
    /// # use gourd_core::constraints;
    /// # use gourd_core::termination::Indefinite;
    /// let mut solver = Solver::default();
    /// let x = solver.new_bounded_integer(0, 2).unwrap();
    /// let y = solver.new_bounded_integer(0, 2).unwrap();
    /// solver.add_constraint(constraints::binary_less_than(x, y)).unwrap();
    ///
    /// let mut brancher = solver.default_brancher();
    /// let result = solver.all_solutions(&mut brancher, &mut Indefinite);
    ///
    /// assert!(result.is_complete);
    /// assert_eq!(result.solutions.len(), 3);
    /// ```
    pub fn all_solutions<B: Brancher, T: TerminationCondition>(
        &mut self,
        brancher: &mut B,
        termination: &mut T,
    ) -> AllSolutions {
        let mut solutions = vec![];
        let mut iterator = self.get_solution_iterator(brancher, termination);

        let is_complete = loop {
            match iterator.next_solution() {
                IteratedSolution::Solution(solution) => solutions.push(solution),
                IteratedSolution::Finished | IteratedSolution::Unsatisfiable => break true,
                IteratedSolution::Unknown => break false,
            }
        };

        info!(
            "Found {} solution(s), enumeration complete: {is_complete}",
            solutions.len()
        );

        AllSolutions {
            solutions,
            is_complete,
        }
    }

    /// Solves the model currently in the [`Solver`] to optimality with the provided
    /// [`OptimisationProcedure`].
    pub fn optimise<B, Callback>(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        mut optimisation_procedure: impl OptimisationProcedure<B, Callback>,
    ) -> OptimisationResult
    where
        B: Brancher,
        Callback: SolutionCallback<B>,
    {
        optimisation_procedure.optimise(brancher, termination, self)
    }

    /// Finds a solution which minimises `objective` using branch-and-bound.
    ///
    /// # Example
    /// ```rust
    /// # use gourd_core::Solver;
    /// # use gourd_core::constraints;
    /// # use gourd_core::results::OptimisationResult;
    /// # use gourd_core::results::ProblemSolution;
    /// # use gourd_core::termination::Indefinite;
    /// let mut solver = Solver::default();
    /// let x = solver.new_bounded_integer(0, 10).unwrap();
    /// let y = solver.new_bounded_integer(0, 10).unwrap();
    /// solver.add_constraint(constraints::greater_than_or_equals([x, y], 7)).unwrap();
    ///
    /// let mut brancher = solver.default_brancher();
    /// let result = solver.minimise(&mut brancher, &mut Indefinite, x);
    ///
    /// let OptimisationResult::Optimal(solution) = result else {
    ///     panic!("the problem is feasible");
    /// };
    /// assert_eq!(solution.get_integer_value(x), 0);
    /// ```
    pub fn minimise<B: Brancher, Var: IntegerVariable>(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        objective: Var,
    ) -> OptimisationResult {
        self.optimise(
            brancher,
            termination,
            BranchAndBound::new(
                OptimisationDirection::Minimise,
                objective,
                NoCallback::<B>::None,
            ),
        )
    }

    /// Finds a solution which maximises `objective` using branch-and-bound.
    pub fn maximise<B: Brancher, Var: IntegerVariable>(
        &mut self,
        brancher: &mut B,
        termination: &mut impl TerminationCondition,
        objective: Var,
    ) -> OptimisationResult {
        self.optimise(
            brancher,
            termination,
            BranchAndBound::new(
                OptimisationDirection::Maximise,
                objective,
                NoCallback::<B>::None,
            ),
        )
    }
}

// Modelling.
impl Solver {
    /// Add a constraint to the solver. Constraints are created through the builders in
    /// [`crate::constraints`].
    ///
    /// If the model becomes infeasible at the root, a [`DeclarationError`] is returned and all
    /// later declarations fail with [`DeclarationError::InfeasibleState`].
    ///
    /// # Example
    /// ```
    /// # use gourd_core::constraints;
    /// # use gourd_core::Solver;
    /// let mut solver = Solver::default();
    /// let a = solver.new_bounded_integer(0, 3).unwrap();
    /// let b = solver.new_bounded_integer(0, 3).unwrap();
    /// solver.add_constraint(constraints::equals([a, b], 0)).unwrap();
    ///
    /// assert_eq!(solver.upper_bound(&a), 0);
    /// ```
    pub fn add_constraint(&mut self, constraint: impl Constraint) -> Result<(), DeclarationError> {
        constraint.post(self)
    }

    /// Makes `predicate` hold at the root.
    pub fn post(&mut self, predicate: Predicate) -> Result<(), DeclarationError> {
        self.satisfaction_solver.post_at_root(predicate)
    }

    /// Post a new propagator to the solver and propagate the root. If unsatisfiability is
    /// detected, this returns [`DeclarationError::InfeasibleConstraint`].
    pub(crate) fn add_propagator<Constructor>(
        &mut self,
        constructor: Constructor,
    ) -> Result<PropagatorHandle<Constructor::PropagatorImpl>, DeclarationError>
    where
        Constructor: PropagatorConstructor,
        Constructor::PropagatorImpl: 'static,
    {
        self.satisfaction_solver.add_propagator(constructor)
    }
}

/// The [`Brancher`] returned by [`Solver::default_brancher`].
pub type DefaultBrancher = SequentialBrancher;

// Search strategy.
impl Solver {
    /// Creates a brancher over every variable in the solver: integer variables are branched on
    /// with [`FirstFail`] and [`InDomainMin`], set variables with a [`SetElementBrancher`] and
    /// real variables with a [`RealSplitBrancher`].
    pub fn default_brancher(&self) -> DefaultBrancher {
        let assignments = &self.satisfaction_solver.state.assignments;

        let mut integers = vec![];
        let mut sets = vec![];
        let mut reals = vec![];

        for domain_id in assignments.get_domains() {
            match assignments.get_domain(domain_id) {
                Domain::Integer(_) => integers.push(domain_id),
                Domain::Set(_) => sets.push(SetVariable::new(domain_id)),
                Domain::Real(_) => reals.push(RealVariable::new(domain_id)),
            }
        }

        let mut branchers: Vec<Box<dyn Brancher>> = vec![];
        if !integers.is_empty() {
            branchers.push(Box::new(IndependentVariableValueBrancher::new(
                FirstFail::new(&integers),
                InDomainMin,
            )));
        }
        if !sets.is_empty() {
            branchers.push(Box::new(SetElementBrancher::new(&sets)));
        }
        if !reals.is_empty() {
            branchers.push(Box::new(RealSplitBrancher::new(&reals)));
        }

        SequentialBrancher::new(branchers)
    }
}
