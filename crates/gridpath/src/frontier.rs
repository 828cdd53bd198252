//! Indexed min-heap of `(state, priority)` entries.
//!
//! Entries are ordered by `(priority, seq)`: lower priorities pop first and
//! ties pop in insertion order. A `state → slot` map is kept in sync with
//! every swap, so membership, priority lookup and decrease-key are O(1) /
//! O(log n) instead of a linear scan.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::FrontierError;

#[derive(Debug, Clone)]
struct Entry<S> {
    state: S,
    priority: i32,
    /// Insertion counter; breaks priority ties FIFO.
    seq: u64,
}

impl<S> Entry<S> {
    #[inline]
    fn key(&self) -> (i32, u64) {
        (self.priority, self.seq)
    }
}

/// Priority frontier for best-first search.
#[derive(Debug, Clone)]
pub struct Frontier<S> {
    heap: Vec<Entry<S>>,
    slots: HashMap<S, usize>,
    seq: u64,
    high_water: usize,
}

impl<S> Default for Frontier<S> {
    fn default() -> Self {
        Self {
            heap: Vec::new(),
            slots: HashMap::new(),
            seq: 0,
            high_water: 0,
        }
    }
}

impl<S: Copy + Eq + Hash + Debug> Frontier<S> {
    /// Create an empty frontier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `state` at `priority`.
    ///
    /// Returns `false`, leaving the frontier untouched, if `state` is
    /// already queued; use [`decrease_priority`](Self::decrease_priority)
    /// for those.
    pub fn push(&mut self, state: S, priority: i32) -> bool {
        if self.slots.contains_key(&state) {
            return false;
        }
        let seq = self.seq;
        self.seq += 1;
        let slot = self.heap.len();
        self.heap.push(Entry {
            state,
            priority,
            seq,
        });
        self.slots.insert(state, slot);
        self.sift_up(slot);
        self.high_water = self.high_water.max(self.heap.len());
        true
    }

    /// Remove and return the entry with the lowest priority.
    pub fn pop_min(&mut self) -> Option<(S, i32)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let entry = self.heap.pop()?;
        self.slots.remove(&entry.state);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((entry.state, entry.priority))
    }

    /// Lower the priority of a queued state in place.
    ///
    /// Setting the current priority again is a no-op. The entry keeps its
    /// original insertion order for tie-breaking.
    ///
    /// # Errors
    ///
    /// [`FrontierError::NotQueued`] if `state` is absent, and
    /// [`FrontierError::PriorityNotLower`] if `priority` is higher than the
    /// current one.
    pub fn decrease_priority(&mut self, state: S, priority: i32) -> Result<(), FrontierError> {
        let Some(&slot) = self.slots.get(&state) else {
            return Err(FrontierError::NotQueued {
                state: format!("{state:?}"),
            });
        };
        let current = self.heap[slot].priority;
        if priority > current {
            return Err(FrontierError::PriorityNotLower {
                state: format!("{state:?}"),
                current,
                requested: priority,
            });
        }
        if priority < current {
            self.heap[slot].priority = priority;
            self.sift_up(slot);
        }
        Ok(())
    }

    /// Whether `state` is currently queued.
    #[inline]
    pub fn contains(&self, state: &S) -> bool {
        self.slots.contains_key(state)
    }

    /// Current priority of a queued state.
    #[inline]
    pub fn priority(&self, state: &S) -> Option<i32> {
        self.slots.get(state).map(|&i| self.heap[i].priority)
    }

    /// Lowest queued priority without removing it.
    #[inline]
    pub fn peek_priority(&self) -> Option<i32> {
        self.heap.first().map(|e| e.priority)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest number of entries held at once since creation or the last
    /// [`clear`](Self::clear).
    #[inline]
    pub fn high_water(&self) -> usize {
        self.high_water
    }

    /// Drop every entry, keeping allocations.
    pub fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
        self.seq = 0;
        self.high_water = 0;
    }

    // -----------------------------------------------------------------------
    // Heap maintenance
    // -----------------------------------------------------------------------

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.heap.swap(a, b);
        self.slots.insert(self.heap[a].state, a);
        self.slots.insert(self.heap[b].state, b);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if self.heap[i].key() >= self.heap[parent].key() {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut least = i;
            if left < n && self.heap[left].key() < self.heap[least].key() {
                least = left;
            }
            if right < n && self.heap[right].key() < self.heap[least].key() {
                least = right;
            }
            if least == i {
                break;
            }
            self.swap(i, least);
            i = least;
        }
    }
}
