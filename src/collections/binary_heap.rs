use crate::error::{CollectionError, Result};

/// Which end of the ordering a heap yields first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeapOrder {
    #[default]
    Min,
    Max,
}

impl HeapOrder {
    /// Returns `true` if `a` must sit above `b` in the heap.
    pub(crate) fn prefers<T: PartialOrd>(self, a: &T, b: &T) -> bool {
        match self {
            HeapOrder::Min => a < b,
            HeapOrder::Max => a > b,
        }
    }
}

/// Array-backed binary heap over partially ordered items.
///
/// Unlike `std::collections::BinaryHeap` it works with `f64`-keyed items
/// and can be ordered either way.
#[derive(Debug, Clone)]
pub struct BinaryHeap<T> {
    items: Vec<T>,
    order: HeapOrder,
}

impl<T: PartialOrd> BinaryHeap<T> {
    /// Creates an empty heap.
    #[must_use]
    pub fn new(order: HeapOrder) -> Self {
        Self {
            items: Vec::new(),
            order,
        }
    }

    /// Creates an empty min-heap.
    #[must_use]
    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    /// Creates an empty max-heap.
    #[must_use]
    pub fn max() -> Self {
        Self::new(HeapOrder::Max)
    }

    /// Builds a heap from arbitrary items in O(n).
    #[must_use]
    pub fn from_vec(items: Vec<T>, order: HeapOrder) -> Self {
        let mut heap = Self { items, order };
        for i in (0..heap.items.len() / 2).rev() {
            heap.sift_down(i);
        }
        heap
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn order(&self) -> HeapOrder {
        self.order
    }

    /// Inserts an item in O(log n), doubling the backing capacity when full.
    pub fn push(&mut self, item: T) {
        if self.items.len() == self.items.capacity() {
            self.items.reserve(self.items.capacity().max(1));
        }
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Returns the top item without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyHeap`] if the heap is empty.
    pub fn peek(&self) -> Result<&T> {
        self.items.first().ok_or_else(|| CollectionError::EmptyHeap.into())
    }

    /// Removes and returns the top item in O(log n).
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::EmptyHeap`] if the heap is empty.
    pub fn take(&mut self) -> Result<T> {
        if self.items.is_empty() {
            return Err(CollectionError::EmptyHeap.into());
        }
        let last = self.items.len() - 1;
        self.items.swap(0, last);
        let top = self.items.pop().ok_or(CollectionError::EmptyHeap)?;
        if !self.items.is_empty() {
            self.sift_down(0);
        }
        Ok(top)
    }

    /// Consumes the heap, yielding items in heap order.
    pub fn into_sorted_iter(self) -> impl Iterator<Item = T> {
        let mut heap = self;
        std::iter::from_fn(move || heap.take().ok())
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if !self.order.prefers(&self.items[i], &self.items[parent]) {
                break;
            }
            self.items.swap(i, parent);
            i = parent;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.items.len();
        loop {
            let left = 2 * i + 1;
            let right = left + 1;
            let mut best = i;
            if left < n && self.order.prefers(&self.items[left], &self.items[best]) {
                best = left;
            }
            if right < n && self.order.prefers(&self.items[right], &self.items[best]) {
                best = right;
            }
            if best == i {
                break;
            }
            self.items.swap(i, best);
            i = best;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::VisigraphError;

    #[test]
    fn min_heap_yields_ascending() {
        let mut heap = BinaryHeap::min();
        for v in [5.0, 1.5, 9.0, -2.0, 3.0] {
            heap.push(v);
        }
        assert_eq!(heap.len(), 5);
        let drained: Vec<f64> = heap.into_sorted_iter().collect();
        assert_eq!(drained, vec![-2.0, 1.5, 3.0, 5.0, 9.0]);
    }

    #[test]
    fn max_heap_yields_descending() {
        let heap = BinaryHeap::from_vec(vec![3, 8, 1, 6, 6], HeapOrder::Max);
        let drained: Vec<i32> = heap.into_sorted_iter().collect();
        assert_eq!(drained, vec![8, 6, 6, 3, 1]);
    }

    #[test]
    fn peek_does_not_remove() {
        let mut heap = BinaryHeap::min();
        heap.push(4);
        heap.push(2);
        assert_eq!(*heap.peek().unwrap(), 2);
        assert_eq!(heap.len(), 2);
        assert_eq!(heap.take().unwrap(), 2);
        assert_eq!(heap.take().unwrap(), 4);
    }

    #[test]
    fn empty_heap_fails_explicitly() {
        let mut heap: BinaryHeap<f64> = BinaryHeap::min();
        assert!(matches!(
            heap.peek().unwrap_err(),
            VisigraphError::Collection(CollectionError::EmptyHeap)
        ));
        assert!(heap.take().is_err());
    }

    #[test]
    fn capacity_doubles_on_growth() {
        let mut heap = BinaryHeap::max();
        heap.push(1);
        let cap = heap.items.capacity();
        for i in 0..cap {
            heap.push(i32::try_from(i).unwrap());
        }
        assert!(heap.items.capacity() >= 2 * cap);
    }
}
