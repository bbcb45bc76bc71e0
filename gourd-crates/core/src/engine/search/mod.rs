//! The depth-first exploration of the search tree.
//!
//! The open choice points are kept on an explicit stack of [`SearchFrame`]s, from the root
//! downwards. Each frame remembers the checkpoint at which its choice point was created and the
//! next alternative to try; trying an alternative restores the state to that checkpoint, opens a
//! new checkpoint, and posts the alternative. A frame whose alternatives are exhausted is popped,
//! which backtracks to its parent.

mod search_tracer;

pub use search_tracer::*;

use crate::branching::ChoicePoint;

#[derive(Debug)]
pub(crate) struct SearchFrame {
    /// The checkpoint of the state when the choice point was created.
    pub(crate) checkpoint: usize,
    pub(crate) choice_point: ChoicePoint,
    /// The index of the alternative which will be tried next.
    pub(crate) next_alternative: usize,
}

impl SearchFrame {
    pub(crate) fn new(checkpoint: usize, choice_point: ChoicePoint) -> SearchFrame {
        SearchFrame {
            checkpoint,
            choice_point,
            next_alternative: 0,
        }
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.next_alternative == self.choice_point.num_alternatives()
    }
}

/// The result of moving to the next alternative of the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchStep {
    /// An alternative was posted and propagated without contradiction.
    Descended,
    /// Every alternative of every open choice point has been tried.
    Exhausted,
    /// The termination condition triggered.
    Stopped,
}
