mod binary_heap;
mod indexed_queue;

pub use binary_heap::{BinaryHeap, HeapOrder};
pub use indexed_queue::IndexedPriorityQueue;
