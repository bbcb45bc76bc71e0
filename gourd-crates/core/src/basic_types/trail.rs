use std::iter::Rev;
use std::vec::Drain;

use crate::gourd_assert_simple;

/// An undo log split into checkpoints.
///
/// Changes are pushed as they happen. [`Trail::synchronise`] removes everything pushed after a
/// checkpoint and yields it newest first, which is the order in which it has to be undone.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    entries: Vec<T>,
    /// Element `i` is the number of entries which existed when checkpoint `i + 1` was opened.
    checkpoint_starts: Vec<usize>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            entries: Vec::new(),
            checkpoint_starts: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn get_checkpoint(&self) -> usize {
        self.checkpoint_starts.len()
    }

    pub(crate) fn new_checkpoint(&mut self) {
        self.checkpoint_starts.push(self.entries.len());
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry);
    }

    /// Closes every checkpoint above `checkpoint` and drains the entries they contained.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        gourd_assert_simple!(
            checkpoint < self.get_checkpoint(),
            "cannot synchronise the trail from checkpoint {} to {checkpoint}",
            self.get_checkpoint()
        );

        let kept = self.checkpoint_starts[checkpoint];
        self.checkpoint_starts.truncate(checkpoint);
        self.entries.drain(kept..).rev()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_checkpoints() -> Trail<char> {
        let mut trail = Trail::default();
        trail.push('a');
        for entry in ['b', 'c', 'd'] {
            trail.new_checkpoint();
            trail.push(entry);
        }
        trail
    }

    #[test]
    fn entries_come_back_newest_first() {
        let mut trail = three_checkpoints();

        let undone = trail.synchronise(0).collect::<String>();

        assert_eq!(undone, "dcb");
        assert_eq!(trail.get_checkpoint(), 0);
        assert_eq!(trail.entries, ['a']);
    }

    #[test]
    fn entries_below_the_target_checkpoint_are_kept() {
        let mut trail = three_checkpoints();

        let _ = trail.synchronise(2);
        assert_eq!(trail.entries, ['a', 'b', 'c']);

        trail.push('e');
        let undone = trail.synchronise(1).collect::<Vec<_>>();
        assert_eq!(undone, ['e', 'c']);
    }

    #[test]
    fn an_empty_checkpoint_drains_nothing() {
        let mut trail = Trail::<u8>::default();
        trail.new_checkpoint();
        trail.new_checkpoint();

        assert_eq!(trail.synchronise(1).count(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    #[should_panic]
    fn synchronising_upwards_is_a_programming_error() {
        let mut trail = Trail::<u8>::default();
        trail.new_checkpoint();

        let _ = trail.synchronise(3);
    }
}
