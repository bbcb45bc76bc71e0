use log::debug;
use log::info;

use crate::basic_types::SolutionReference;
use crate::branching::ChoicePoint;

/// Receives the events of the search, e.g. to report progress to a user.
///
/// All methods have an empty default implementation. Any closure accepting a [`SearchEvent`] is
/// also a tracer, and [`LoggingTracer`] forwards every event to the `log` facade.
pub trait SearchTracer {
    /// A solution has been found.
    fn on_solution(&mut self, _solution: SolutionReference) {}

    /// An alternative failed during propagation at the given depth.
    fn on_failure(&mut self, _depth: usize) {}

    /// A choice point was created at the given depth.
    fn on_choice_point(&mut self, _depth: usize, _choice_point: &ChoicePoint) {}

    /// The search returned to the given depth after exhausting a choice point.
    fn on_backtrack(&mut self, _depth: usize) {}
}

/// The events a [`SearchTracer`] is notified of.
#[derive(Debug, Clone, Copy)]
pub enum SearchEvent<'a> {
    Solution(SolutionReference<'a>),
    Failure {
        depth: usize,
    },
    Branch {
        depth: usize,
        choice_point: &'a ChoicePoint,
    },
    Backtrack {
        depth: usize,
    },
}

impl<F> SearchTracer for F
where
    F: FnMut(SearchEvent<'_>),
{
    fn on_solution(&mut self, solution: SolutionReference) {
        (self)(SearchEvent::Solution(solution))
    }

    fn on_failure(&mut self, depth: usize) {
        (self)(SearchEvent::Failure { depth })
    }

    fn on_choice_point(&mut self, depth: usize, choice_point: &ChoicePoint) {
        (self)(SearchEvent::Branch {
            depth,
            choice_point,
        })
    }

    fn on_backtrack(&mut self, depth: usize) {
        (self)(SearchEvent::Backtrack { depth })
    }
}

/// A [`SearchTracer`] which ignores all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentTracer;

impl SearchTracer for SilentTracer {}

/// A [`SearchTracer`] which writes the events to the `log` facade: solutions at the info level
/// and everything else at the debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingTracer {
    num_solutions: u64,
}

impl SearchTracer for LoggingTracer {
    fn on_solution(&mut self, solution: SolutionReference) {
        self.num_solutions += 1;
        info!(
            "Solution {} found over {} variables",
            self.num_solutions,
            solution.get_domains().count()
        );
    }

    fn on_failure(&mut self, depth: usize) {
        debug!("Failure at depth {depth}");
    }

    fn on_choice_point(&mut self, depth: usize, choice_point: &ChoicePoint) {
        debug!(
            "Choice point at depth {depth} with alternatives {:?}",
            choice_point.alternatives()
        );
    }

    fn on_backtrack(&mut self, depth: usize) {
        debug!("Backtracked to depth {depth}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::variables::DomainId;
    use crate::predicate;

    #[test]
    fn closures_receive_the_events() {
        let mut depths = vec![];
        let x = DomainId::new(0);
        let choice_point = ChoicePoint::binary(predicate![x <= 1]);

        {
            let mut tracer = |event: SearchEvent<'_>| match event {
                SearchEvent::Branch { depth, .. }
                | SearchEvent::Failure { depth }
                | SearchEvent::Backtrack { depth } => depths.push(depth),
                SearchEvent::Solution(_) => {}
            };

            tracer.on_choice_point(0, &choice_point);
            tracer.on_failure(1);
            tracer.on_backtrack(0);
        }

        assert_eq!(vec![0, 1, 0], depths);
    }
}
