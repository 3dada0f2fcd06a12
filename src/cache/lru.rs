//! LRU Tracker Module
//!
//! Keeps object keys in recency order for eviction.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Recency order of cached object keys.
///
/// Front = most recently used, back = least recently used. Keys touched at
/// the same instant keep their touch order, so eviction is deterministic.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    // == Constructor ==
    /// Creates a new empty tracker.
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        match self.order.iter().position(|k| k == key) {
            Some(0) => {}
            Some(idx) => {
                if let Some(existing) = self.order.remove(idx) {
                    self.order.push_front(existing);
                }
            }
            None => self.order.push_front(key.to_string()),
        }
    }

    // == Pop Least Recent ==
    /// Removes and returns the least recently used key.
    pub fn pop_least_recent(&mut self) -> Option<String> {
        self.order.pop_back()
    }
}
