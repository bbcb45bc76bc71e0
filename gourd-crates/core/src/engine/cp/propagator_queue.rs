use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::Rng;
use rand::SeedableRng;

use crate::containers::KeyedVec;
use crate::engine::QueueOrder;
use crate::gourd_assert_moderate;
use crate::propagation::Priority;
use crate::propagation::PropagatorId;

/// The queue of propagators which have been notified of a change and still need to run.
///
/// Propagators with a higher [`Priority`] always run first; within a priority level the
/// [`QueueOrder`] determines which of the enqueued propagators runs next. A propagator is in the
/// queue at most once.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
    num_enqueued: usize,
    present_priorities: BinaryHeap<Reverse<u32>>,
    order: QueueOrder,
    rng: SmallRng,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        Self::new(4, QueueOrder::default())
    }
}

impl PropagatorQueue {
    pub(crate) fn new(num_priority_levels: u32, order: QueueOrder) -> PropagatorQueue {
        let seed = match order {
            QueueOrder::Random { seed } => seed,
            QueueOrder::Fifo | QueueOrder::Lifo => 0,
        };

        PropagatorQueue {
            queues: vec![VecDeque::new(); num_priority_levels as usize],
            is_enqueued: KeyedVec::default(),
            num_enqueued: 0,
            present_priorities: BinaryHeap::new(),
            order,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.num_enqueued == 0
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: Priority) {
        gourd_assert_moderate!((priority as usize) < self.queues.len());

        if !self.is_propagator_enqueued(propagator_id) {
            self.is_enqueued.grow_to_include(propagator_id, false);
            self.is_enqueued[propagator_id] = true;
            self.num_enqueued += 1;

            if self.queues[priority as usize].is_empty() {
                self.present_priorities.push(Reverse(priority as u32));
            }
            self.queues[priority as usize].push_back(propagator_id);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        gourd_assert_moderate!(!self.queues[top_priority].is_empty());

        let queue = &mut self.queues[top_priority];
        let next_propagator_id = match self.order {
            QueueOrder::Fifo => queue.pop_front(),
            QueueOrder::Lifo => queue.pop_back(),
            QueueOrder::Random { .. } => {
                let index = self.rng.gen_range(0..queue.len());
                queue.swap_remove_back(index)
            }
        };

        if let Some(propagator_id) = next_propagator_id {
            self.is_enqueued[propagator_id] = false;
            self.num_enqueued -= 1;

            if self.queues[top_priority].is_empty() {
                let _ = self.present_priorities.pop();
            }
        }

        next_propagator_id
    }

    pub(crate) fn clear(&mut self) {
        while let Some(Reverse(priority)) = self.present_priorities.pop() {
            self.queues[priority as usize].clear();
        }

        for is_propagator_enqueued in self.is_enqueued.iter_mut() {
            *is_propagator_enqueued = false;
        }

        self.num_enqueued = 0;
    }

    pub(crate) fn is_propagator_enqueued(&self, propagator_id: PropagatorId) -> bool {
        self.is_enqueued
            .get(propagator_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_priorities_are_popped_first() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(1), Priority::High);
        queue.enqueue_propagator(PropagatorId(0), Priority::Medium);
        queue.enqueue_propagator(PropagatorId(3), Priority::VeryLow);
        queue.enqueue_propagator(PropagatorId(4), Priority::Low);

        assert_eq!(Some(PropagatorId(1)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert_eq!(Some(PropagatorId(4)), queue.pop());
        assert_eq!(Some(PropagatorId(3)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn lifo_pops_the_last_enqueued_propagator() {
        let mut queue = PropagatorQueue::new(4, QueueOrder::Lifo);

        queue.enqueue_propagator(PropagatorId(0), Priority::Low);
        queue.enqueue_propagator(PropagatorId(1), Priority::Low);

        assert_eq!(Some(PropagatorId(1)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
    }

    #[test]
    fn propagators_are_enqueued_once() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(2), Priority::Low);
        queue.enqueue_propagator(PropagatorId(2), Priority::Low);

        assert_eq!(Some(PropagatorId(2)), queue.pop());
        assert!(queue.is_empty());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn random_order_pops_every_propagator() {
        let mut queue = PropagatorQueue::new(4, QueueOrder::Random { seed: 42 });

        for id in 0..10 {
            queue.enqueue_propagator(PropagatorId(id), Priority::Medium);
        }

        let mut popped = std::iter::from_fn(|| queue.pop())
            .map(|id| id.0)
            .collect::<Vec<_>>();
        popped.sort();

        assert_eq!((0..10).collect::<Vec<_>>(), popped);
    }

    #[test]
    fn clear_empties_the_queue() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(0), Priority::High);
        queue.enqueue_propagator(PropagatorId(1), Priority::Low);
        queue.clear();

        assert!(queue.is_empty());
        assert!(!queue.is_propagator_enqueued(PropagatorId(0)));
        assert_eq!(None, queue.pop());
    }
}
