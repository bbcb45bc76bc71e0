pub(crate) mod constraint_satisfaction_solver;
pub(crate) mod cp;
pub(crate) mod domains;
pub(crate) mod predicates;
pub(crate) mod search;
mod solver_statistics;
mod state;
pub(crate) mod termination;
pub(crate) mod variables;

pub(crate) use constraint_satisfaction_solver::ConstraintSatisfactionSolver;
pub use constraint_satisfaction_solver::QueueOrder;
pub use constraint_satisfaction_solver::SolverOptions;
pub use cp::Assignments;
pub use domains::EmptyDomain;
pub use solver_statistics::SolverStatistics;
pub use state::State;
