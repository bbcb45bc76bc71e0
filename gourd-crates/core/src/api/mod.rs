mod outputs;
pub(crate) mod solver;

pub mod results {
    //! Contains the outputs of solving using the [`Solver`].
    //!
    //! We differentiate between 3 different types of results:
    //! - For a **satisfaction** problem ([`SatisfactionResult`])
    //! - For an **optimisation** problem ([`OptimisationResult`])
    //! - For an **enumeration** of all solutions ([`AllSolutions`] and [`SolutionIterator`])
    //!
    //! On its own, a [`SatisfactionResult`] or an [`OptimisationResult`] carries an owned
    //! [`Solution`], from which the values of the variables can be retrieved through the
    //! [`ProblemSolution`] trait.
    pub use crate::api::outputs::solution_iterator::IteratedSolution;
    pub use crate::api::outputs::solution_iterator::SolutionIterator;
    pub use crate::api::outputs::AllSolutions;
    pub use crate::api::outputs::OptimisationResult;
    pub use crate::api::outputs::SatisfactionResult;
    pub use crate::basic_types::ProblemSolution;
    pub use crate::basic_types::Solution;
    pub use crate::basic_types::SolutionReference;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod variables {
    //! Contains the variables which can be created through the [`Solver`].
    //!
    //! Integer variables are [`DomainId`]s; an [`AffineView`] transforms an integer variable
    //! (`a * x + b`) without introducing a new domain. Set variables ([`SetVariable`]) range over
    //! the sets between a lower and an upper bound, and real variables ([`RealVariable`]) over an
    //! interval compared with a precision.
    pub use crate::engine::variables::AffineView;
    pub use crate::engine::variables::DomainId;
    pub use crate::engine::variables::IntegerVariable;
    pub use crate::engine::variables::RealVariable;
    pub use crate::engine::variables::SetVariable;
    pub use crate::engine::variables::TransformableVariable;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod domains {
    //! The value sets underlying the variables.
    pub use crate::engine::domains::BitSetDomain;
    pub use crate::engine::domains::Domain;
    pub use crate::engine::domains::DomainChange;
    pub use crate::engine::domains::FiniteDomain;
    pub use crate::engine::domains::IntegerDomain;
    pub use crate::engine::domains::Interval;
    pub use crate::engine::domains::IntervalDomain;
    pub use crate::engine::domains::RealDomain;
    pub use crate::engine::domains::SetDomain;
    pub use crate::engine::EmptyDomain;
}

pub mod options {
    //! Contains the options which can be passed to the [`Solver`] and its constraints.
    pub use crate::engine::QueueOrder;
    pub use crate::engine::SolverOptions;
    pub use crate::optimisation::OptimisationDirection;
    pub use crate::propagators::regular::RegularOptions;
    pub use crate::propagators::regular::SupportStrategy;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod termination {
    //! Contains the conditions which are used to determine when the [`Solver`] should terminate
    //! even when the state of the satisfaction/optimisation problem is unknown.
    //!
    //! The main [`TerminationCondition`] is a condition which polls whether the [`Solver`] should
    //! stop. Several conditions can be combined with a [`Combinator`].
    pub use crate::engine::termination::*;
    #[cfg(doc)]
    use crate::Solver;
}

pub mod predicates {
    //! Contains structures which represent certain [predicates](https://en.wikipedia.org/wiki/Predicate_(mathematical_logic)).
    //!
    //! The solver only utilizes atomic constraints, which are the decisions made during search and
    //! the facts posted at the root:
    //! - `[x >= v]`, `[x <= v]`, `[x == v]` and `[x != v]` for integer variables
    //! - `[s contains v]` and `[s excludes v]` for set variables
    //! - `[r >= v]` and `[r <= v]` for real variables
    //!
    //! They are created with the [`predicate!`](crate::predicate) macro and can be negated with
    //! `!`.
    pub use crate::engine::predicates::Predicate;
    pub use crate::engine::predicates::PredicateConstructor;
}

pub mod state {
    //! The container of the domains and the propagators, used directly when testing the
    //! propagation engine without search.
    pub use crate::engine::Assignments;
    pub use crate::engine::State;
}

pub mod search {
    //! Hooks into the depth-first search of the [`Solver`].
    //!
    //! A [`SearchTracer`] is notified of solutions, failures, choice points and backtracks. The
    //! [`LoggingTracer`] forwards these events to the `log` facade, and any closure taking a
    //! [`SearchEvent`] can act as a tracer.
    pub use crate::engine::search::LoggingTracer;
    pub use crate::engine::search::SearchEvent;
    pub use crate::engine::search::SearchTracer;
    pub use crate::engine::search::SilentTracer;
    pub use crate::engine::SolverStatistics;
    #[cfg(doc)]
    use crate::Solver;
}
