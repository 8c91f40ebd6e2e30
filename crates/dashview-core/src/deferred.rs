//! Deferred queue for work that must wait on a one-shot lifecycle event.
//!
//! Items are posted while a precondition does not hold yet (for example, a
//! view that has not rendered its anchor) and drained exactly once when it
//! does. Pending items can be cancelled before the drain.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

/// A unique identifier for a deferred item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeferredId(u64);

impl DeferredId {
    /// Get the raw u64 value of this ID.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Global counter for generating unique IDs.
static NEXT_DEFERRED_ID: AtomicU64 = AtomicU64::new(1);

fn next_deferred_id() -> DeferredId {
    DeferredId(NEXT_DEFERRED_ID.fetch_add(1, Ordering::Relaxed))
}

/// Pending items in posting order.
#[derive(Debug)]
pub struct DeferredQueue<T> {
    items: VecDeque<(DeferredId, T)>,
}

impl<T> DeferredQueue<T> {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Post an item; returns the ID that can be used to cancel it.
    pub fn post(&mut self, item: T) -> DeferredId {
        let id = next_deferred_id();
        self.items.push_back((id, item));
        id
    }

    /// Cancel a pending item, handing it back to the caller.
    pub fn cancel(&mut self, id: DeferredId) -> Option<T> {
        let pos = self.items.iter().position(|(item_id, _)| *item_id == id)?;
        self.items.remove(pos).map(|(_, item)| item)
    }

    /// Check if there are any pending items.
    pub fn has_pending(&self) -> bool {
        !self.items.is_empty()
    }

    /// Get the number of pending items.
    pub fn pending_count(&self) -> usize {
        self.items.len()
    }

    /// Take every pending item, oldest first, leaving the queue empty.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + use<T> {
        std::mem::take(&mut self.items).into_iter().map(|(_, item)| item)
    }
}

impl<T> Default for DeferredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_and_drain_in_order() {
        let mut queue = DeferredQueue::new();
        queue.post("a");
        queue.post("b");

        assert_eq!(queue.pending_count(), 2);
        assert_eq!(queue.drain().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(!queue.has_pending());
    }

    #[test]
    fn test_drain_runs_once() {
        let mut queue = DeferredQueue::new();
        queue.post(1);

        assert_eq!(queue.drain().count(), 1);
        assert_eq!(queue.drain().count(), 0);
    }

    #[test]
    fn test_cancel_returns_item() {
        let mut queue = DeferredQueue::new();
        let first = queue.post(1);
        queue.post(2);

        assert_eq!(queue.cancel(first), Some(1));
        assert_eq!(queue.cancel(first), None);
        assert_eq!(queue.drain().collect::<Vec<_>>(), vec![2]);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut queue = DeferredQueue::new();
        let a = queue.post(());
        let b = queue.post(());
        assert_ne!(a, b);
        assert!(b.as_u64() > a.as_u64());
    }
}
