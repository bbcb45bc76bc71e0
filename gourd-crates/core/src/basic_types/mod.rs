mod contradiction;
mod csp_solver_execution_flag;
mod declaration_error;
mod solution;
mod trail;

pub use contradiction::Contradiction;
pub use contradiction::PropagationStatusCP;
pub(crate) use csp_solver_execution_flag::CSPSolverExecutionFlag;
pub use declaration_error::DeclarationError;
pub use solution::ProblemSolution;
pub use solution::Solution;
pub use solution::SolutionReference;
pub(crate) use trail::Trail;
