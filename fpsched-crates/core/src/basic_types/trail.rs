use std::iter::Rev;
use std::ops::Deref;
use std::vec::Drain;

use crate::fpsched_assert_simple;

/// An undo log split into checkpoints. Entries pushed after a checkpoint are handed back, newest
/// first, when the trail is synchronised to an earlier checkpoint.
#[derive(Clone, Debug)]
pub(crate) struct Trail<T> {
    current_checkpoint: usize,
    /// The i-th element is the length of the trail when checkpoint `i + 1` was created.
    checkpoint_delimiters: Vec<usize>,
    entries: Vec<T>,
}

impl<T> Default for Trail<T> {
    fn default() -> Self {
        Trail {
            current_checkpoint: 0,
            checkpoint_delimiters: Vec::new(),
            entries: Vec::new(),
        }
    }
}

impl<T> Trail<T> {
    pub(crate) fn new_checkpoint(&mut self) {
        self.current_checkpoint += 1;
        self.checkpoint_delimiters.push(self.entries.len());
    }

    pub(crate) fn get_checkpoint(&self) -> usize {
        self.current_checkpoint
    }

    pub(crate) fn push(&mut self, entry: T) {
        self.entries.push(entry)
    }

    /// Removes every entry made after `checkpoint` and returns them in reverse order of insertion.
    pub(crate) fn synchronise(&mut self, checkpoint: usize) -> Rev<Drain<'_, T>> {
        fpsched_assert_simple!(
            checkpoint < self.current_checkpoint,
            "can only synchronise to an earlier checkpoint"
        );

        let new_len = self.checkpoint_delimiters[checkpoint];

        self.current_checkpoint = checkpoint;
        self.checkpoint_delimiters.truncate(checkpoint);
        self.entries.drain(new_len..).rev()
    }
}

impl<T> Deref for Trail<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synchronise_returns_entries_newest_first() {
        let mut trail = Trail::default();
        trail.push(1);
        trail.new_checkpoint();
        trail.push(2);
        trail.push(3);
        trail.new_checkpoint();
        trail.push(4);

        let undone: Vec<i32> = trail.synchronise(1).collect();
        assert_eq!(undone, vec![4]);
        assert_eq!(trail.get_checkpoint(), 1);

        let undone: Vec<i32> = trail.synchronise(0).collect();
        assert_eq!(undone, vec![3, 2]);
        assert_eq!(&[1], trail.deref());
    }

    #[test]
    fn checkpoints_without_entries_are_tracked() {
        let mut trail: Trail<u8> = Trail::default();
        trail.new_checkpoint();
        trail.new_checkpoint();
        assert_eq!(trail.get_checkpoint(), 2);

        assert_eq!(trail.synchronise(0).count(), 0);
        assert_eq!(trail.get_checkpoint(), 0);
    }

    #[test]
    #[should_panic]
    fn synchronise_to_current_checkpoint_panics() {
        let mut trail: Trail<u8> = Trail::default();
        trail.new_checkpoint();
        let _ = trail.synchronise(1);
    }
}
