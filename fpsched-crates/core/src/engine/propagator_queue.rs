use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::collections::VecDeque;

use crate::containers::KeyedVec;
use crate::fpsched_assert_moderate;
use crate::propagation::Priority;
use crate::propagation::PropagatorId;

/// Propagators waiting to run, bucketed by [`Priority`]. Within a bucket propagators run in the
/// order in which they were enqueued, and a propagator is never in the queue twice.
#[derive(Debug, Clone)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    is_enqueued: KeyedVec<PropagatorId, bool>,
    present_priorities: BinaryHeap<Reverse<u32>>,
}

impl Default for PropagatorQueue {
    fn default() -> Self {
        Self::new(Priority::VeryLow as u32 + 1)
    }
}

impl PropagatorQueue {
    pub(crate) fn new(num_priority_levels: u32) -> PropagatorQueue {
        PropagatorQueue {
            queues: vec![VecDeque::new(); num_priority_levels as usize],
            is_enqueued: KeyedVec::default(),
            present_priorities: BinaryHeap::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.present_priorities.is_empty()
    }

    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: Priority) {
        fpsched_assert_moderate!((priority as usize) < self.queues.len());

        if self.is_propagator_enqueued(propagator_id) {
            return;
        }

        self.is_enqueued.accomodate(propagator_id, false);
        self.is_enqueued[propagator_id] = true;

        if self.queues[priority as usize].is_empty() {
            self.present_priorities.push(Reverse(priority as u32));
        }
        self.queues[priority as usize].push_back(propagator_id);
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let top_priority = self.present_priorities.peek()?.0 as usize;
        fpsched_assert_moderate!(!self.queues[top_priority].is_empty());

        let propagator_id = self.queues[top_priority].pop_front()?;
        self.is_enqueued[propagator_id] = false;

        if self.queues[top_priority].is_empty() {
            let _ = self.present_priorities.pop();
        }

        Some(propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        for queue in self.queues.iter_mut() {
            queue.clear();
        }
        for is_enqueued in self.is_enqueued.iter_mut() {
            *is_enqueued = false;
        }

        self.present_priorities.clear();
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
    use super::PropagatorQueue;
    use crate::propagation::Priority;
    use crate::propagation::PropagatorId;

    #[test]
    fn higher_priorities_are_popped_first() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(2), Priority::Low);
        queue.enqueue_propagator(PropagatorId(0), Priority::High);
        queue.enqueue_propagator(PropagatorId(1), Priority::Low);

        assert_eq!(queue.pop(), Some(PropagatorId(0)));
        assert_eq!(queue.pop(), Some(PropagatorId(2)));
        assert_eq!(queue.pop(), Some(PropagatorId(1)));
        assert_eq!(queue.pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn enqueueing_twice_is_ignored() {
        let mut queue = PropagatorQueue::default();

        queue.enqueue_propagator(PropagatorId(4), Priority::Medium);
        queue.enqueue_propagator(PropagatorId(4), Priority::Medium);

        assert_eq!(queue.pop(), Some(PropagatorId(4)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut queue = PropagatorQueue::default();
        queue.enqueue_propagator(PropagatorId(1), Priority::VeryLow);
        queue.clear();

        assert!(queue.is_empty());
        assert!(!queue.is_propagator_enqueued(PropagatorId(1)));
        queue.enqueue_propagator(PropagatorId(1), Priority::VeryLow);
        assert_eq!(queue.pop(), Some(PropagatorId(1)));
    }
}
