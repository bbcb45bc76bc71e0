use crate::create_statistics_struct;

create_statistics_struct!(
    /// The statistics of the search, as reported by [`Solver::statistics`](crate::Solver::statistics).
    SolverStatistics {
        /// The number of choice points the search created
        num_choice_points: u64,
        /// The number of alternatives which failed during propagation
        num_failures: u64,
        /// The number of times a propagator was called
        num_propagations: u64,
        /// The number of solutions found
        num_solutions: u64,
        /// The largest number of open choice points at any time
        peak_depth: u64,
        /// The time spent searching, in milliseconds
        time_spent_in_solver: u64,
});
