use downcast_rs::impl_downcast;
use downcast_rs::Downcast;

use super::LocalId;
use super::NotificationContext;
use super::PropagationContext;
use super::PropagationContextMut;
use crate::basic_types::PropagationStatusCP;
#[cfg(doc)]
use crate::create_statistics_struct;
use crate::engine::domains::DomainEvent;
#[cfg(doc)]
use crate::propagation::PropagatorConstructorContext;
use crate::statistics::StatisticLogger;

// We need to use this to cast from `Box<dyn Propagator>` to a concrete propagator type.
impl_downcast!(Propagator);

/// A propagator removes values from domains which will never be in any solution, or raises a
/// [`Contradiction`](crate::basic_types::Contradiction) when the current domains cannot be
/// extended to a solution.
///
/// A propagator only sees the variables it registered for in its
/// [`PropagatorConstructorContext`], and it is only called after one of the events it registered
/// for has happened on one of these variables (and once when it is added to the solver).
///
/// The strength of a propagator must not depend on the order in which the solver calls the
/// propagators; given the same domains, repeated calls must reach the same fixed point.
pub trait Propagator: Downcast {
    /// Return the name of the propagator, this is a convenience method that is used for printing.
    fn name(&self) -> &str;

    /// Performs propagation, pruning the domains of the registered variables.
    ///
    /// Returns an error when the current domains are infeasible for this propagator. A propagator
    /// does not need to reach its own fixed point in one call; the solver keeps calling it as long
    /// as it changes the domains of its variables.
    fn propagate(&mut self, context: PropagationContextMut) -> PropagationStatusCP;

    /// Whether the relation of the propagator holds for the current domains. Only required to be
    /// correct when all of the registered variables are fixed.
    fn is_satisfied(&self, context: PropagationContext) -> bool;

    /// Called when an event happens to one of the variables the propagator is subscribed to. The
    /// event is the one that happened on the underlying domain; views translate it with
    /// [`IntegerVariable::unpack_event`](crate::variables::IntegerVariable::unpack_event).
    ///
    /// The propagator can use this to update incremental state and to decide whether it should
    /// be enqueued.
    fn notify(
        &mut self,
        _context: NotificationContext,
        _local_id: LocalId,
        _event: DomainEvent,
    ) -> EnqueueDecision {
        EnqueueDecision::Enqueue
    }

    /// Called after the solver backtracked. The domains and trailed values are already restored;
    /// propagators with incremental state kept outside of trailed values undo it here.
    fn synchronise(&mut self, _context: PropagationContext) {}

    /// Returns the priority of the propagator represented as an integer. Lower values mean higher
    /// priority and the priority determines the order in which propagators will be asked to
    /// propagate.
    fn priority(&self) -> Priority {
        Priority::VeryLow
    }

    /// Logs statistics of the propagator using the provided [`StatisticLogger`].
    ///
    /// It is recommended to create a struct through the [`create_statistics_struct!`] macro!
    fn log_statistics(&self, _statistic_logger: StatisticLogger) {}
}

/// Indicator of what to do when a propagator is notified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnqueueDecision {
    /// The propagator should be enqueued.
    Enqueue,
    /// The propagator should not be enqueued.
    Skip,
}

/// The priority of a propagator, used to determine the order in which propagators will be
/// called. Propagators of a higher priority always run before those of a lower priority.
#[derive(Default, Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[repr(u8)]
pub enum Priority {
    High = 0,
    Medium = 1,
    Low = 2,
    #[default]
    VeryLow = 3,
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        ((*self) as u8).partial_cmp(&((*other) as u8))
    }
}
