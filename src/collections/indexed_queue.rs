use std::collections::HashMap;
use std::hash::Hash;

use crate::error::{CollectionError, Result};

use super::binary_heap::HeapOrder;

/// Priority queue with a reverse index from key to heap slot.
///
/// Every swap inside the heap also updates the slot index, so the priority of
/// a queued key can be changed in O(log n) without scanning.
#[derive(Debug, Clone)]
pub struct IndexedPriorityQueue<K, P> {
    entries: Vec<(K, P)>,
    slots: HashMap<K, usize>,
    order: HeapOrder,
}

impl<K, P> IndexedPriorityQueue<K, P>
where
    K: Hash + Eq + Clone,
    P: PartialOrd + Copy,
{
    #[must_use]
    pub fn new(order: HeapOrder) -> Self {
        Self {
            entries: Vec::new(),
            slots: HashMap::new(),
            order,
        }
    }

    /// Creates an empty queue yielding the lowest priority first.
    #[must_use]
    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// Queues `key` with `priority`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::DuplicateKey`] if `key` is already queued.
    pub fn push(&mut self, key: K, priority: P) -> Result<()> {
        if self.slots.contains_key(&key) {
            return Err(CollectionError::DuplicateKey.into());
        }
        let slot = self.entries.len();
        self.slots.insert(key.clone(), slot);
        self.entries.push((key, priority));
        self.sift_up(slot);
        Ok(())
    }

    /// Returns the current priority of `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnknownKey`] if `key` is not queued.
    pub fn priority(&self, key: &K) -> Result<P> {
        let slot = self.slot(key)?;
        Ok(self.entries[slot].1)
    }

    /// Changes the priority of a queued key and restores heap order from its
    /// slot.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnknownKey`] if `key` is not queued.
    pub fn update(&mut self, key: &K, priority: P) -> Result<()> {
        let slot = self.slot(key)?;
        self.entries[slot].1 = priority;
        let slot = self.sift_up(slot);
        self.sift_down(slot);
        Ok(())
    }

    /// Queues `key`, or updates it if the new priority is preferred over the
    /// queued one. Returns `true` if the queue changed.
    pub fn push_or_improve(&mut self, key: K, priority: P) -> bool {
        match self.slots.get(&key) {
            None => {
                let slot = self.entries.len();
                self.slots.insert(key.clone(), slot);
                self.entries.push((key, priority));
                self.sift_up(slot);
                true
            }
            Some(&slot) if self.order.prefers(&priority, &self.entries[slot].1) => {
                self.entries[slot].1 = priority;
                self.sift_up(slot);
                true
            }
            Some(_) => false,
        }
    }

    /// Returns the top entry without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyHeap`] if the queue is empty.
    pub fn peek(&self) -> Result<(&K, P)> {
        self.entries
            .first()
            .map(|(k, p)| (k, *p))
            .ok_or_else(|| CollectionError::EmptyHeap.into())
    }

    /// Removes and returns the top entry.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyHeap`] if the queue is empty.
    pub fn take(&mut self) -> Result<(K, P)> {
        if self.entries.is_empty() {
            return Err(CollectionError::EmptyHeap.into());
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let (key, priority) = self.entries.pop().ok_or(CollectionError::EmptyHeap)?;
        self.slots.remove(&key);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Ok((key, priority))
    }

    fn slot(&self, key: &K) -> Result<usize> {
        self.slots
            .get(key)
            .copied()
            .ok_or_else(|| CollectionError::UnknownKey.into())
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        self.slots.insert(self.entries[a].0.clone(), a);
        self.slots.insert(self.entries[b].0.clone(), b);
    }

    fn sift_up(&mut self, mut i: usize) -> usize {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.order.prefers(&self.entries[i].1, &self.entries[parent].1) {
                break;
            }
            self.swap(i, parent);
            i = parent;
        }
        i
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.entries.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;
            if left < n && self.order.prefers(&self.entries[left].1, &self.entries[best].1) {
                best = left;
            }
            if right < n && self.order.prefers(&self.entries[right].1, &self.entries[best].1) {
                best = right;
            }
            if best == i {
                break;
            }
            self.swap(i, best);
            i = best;
        }
    }
}
