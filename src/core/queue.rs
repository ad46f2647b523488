//! FIFO backlog of text values waiting to be shown.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Ordered backlog of pending text values.
///
/// The front entry is the value currently being transitioned to. Entries
/// are removed only from the front, once their transition has finished.
/// Duplicates and empty strings are kept as-is.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingQueue {
    values: VecDeque<String>,
}

impl PendingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value at the back.
    pub fn push(&mut self, value: impl Into<String>) {
        self.values.push_back(value.into());
    }

    /// Remove and return the front value.
    pub fn pop_front(&mut self) -> Option<String> {
        self.values.pop_front()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn front(&self) -> Option<&str> {
        self.get(0)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(String::as_str)
    }

    /// Snapshot of the pending values, front first.
    pub fn to_vec(&self) -> Vec<String> {
        self.values.iter().cloned().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for PendingQueue {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_queue_is_empty() {
        let queue = PendingQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.front(), None);
    }

    #[test]
    fn preserves_insertion_order() {
        let mut queue = PendingQueue::new();
        queue.push("a");
        queue.push("b");
        queue.push("c");

        assert_eq!(queue.pop_front().as_deref(), Some("a"));
        assert_eq!(queue.pop_front().as_deref(), Some("b"));
        assert_eq!(queue.pop_front().as_deref(), Some("c"));
        assert_eq!(queue.pop_front(), None);
    }

    #[test]
    fn keeps_duplicates_and_empty_values() {
        let mut queue = PendingQueue::new();
        queue.push("7");
        queue.push("7");
        queue.push("");

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.get(1), Some("7"));
        assert_eq!(queue.get(2), Some(""));
    }

    #[test]
    fn collects_from_iterator() {
        let queue: PendingQueue = ["x", "y"].into_iter().collect();
        assert_eq!(queue.to_vec(), vec!["x".to_string(), "y".to_string()]);
    }
}
