//! Fixed-capacity history buffer.
//!
//! Pushing into a full buffer drops the oldest entry, so histories never grow
//! past their capacity and never reallocate after construction.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a value, evicting the oldest one when full.
    pub fn push(&mut self, value: T) {
        if self.capacity == 0 {
            return;
        }
        if self.items.len() == self.capacity {
            self.items.pop_front();
        }
        self.items.push_back(value);
    }

    /// Most recently pushed value.
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.items.iter()
    }

    /// The newest `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &T> {
        self.items.iter().skip(self.items.len().saturating_sub(limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut rb = RingBuffer::new(3);
        rb.push(1);
        rb.push(2);
        assert_eq!(rb.len(), 2);
        assert_eq!(rb.last(), Some(&2));
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut rb = RingBuffer::new(3);
        for i in 1..=5 {
            rb.push(i);
        }
        assert_eq!(rb.len(), 3);
        assert_eq!(rb.iter().copied().collect::<Vec<_>>(), vec![3, 4, 5]);
        assert_eq!(rb.capacity(), 3);
    }

    #[test]
    fn test_zero_capacity_retains_nothing() {
        let mut rb = RingBuffer::new(0);
        rb.push(1);
        assert!(rb.is_empty());
        assert_eq!(rb.last(), None);
    }

    #[test]
    fn test_recent_returns_newest_in_order() {
        let mut rb = RingBuffer::new(10);
        for i in 0..8 {
            rb.push(i);
        }
        assert_eq!(rb.recent(3).copied().collect::<Vec<_>>(), vec![5, 6, 7]);
        assert_eq!(rb.recent(50).count(), 8);
        assert_eq!(rb.recent(0).count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut rb = RingBuffer::new(2);
        rb.push("a");
        rb.clear();
        assert!(rb.is_empty());
        assert_eq!(rb.capacity(), 2);
    }
}
