//! Liveness queue: a min-heap over the store arena, ordered by
//! `last_updated_time`, with each element's current position mirrored back
//! onto its `heap_index` field so it can be reprioritized in place.

use crate::detail::{StoreDetail, NOT_IN_HEAP};

/// Min-heap of arena slot indices. Not thread-safe on its own; the pool's
/// single read/write lock covers both the arena and this queue together.
#[derive(Default)]
pub(crate) struct LivenessQueue {
    heap: Vec<usize>,
}

impl LivenessQueue {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn peek(&self) -> Option<usize> {
        self.heap.first().copied()
    }

    /// Inserts `slot` if it isn't already queued, otherwise re-heapifies it
    /// in place after its priority changed. O(log n) either way.
    pub fn enqueue(&mut self, arena: &mut [StoreDetail], slot: usize) {
        if arena[slot].heap_index == NOT_IN_HEAP {
            let index = self.heap.len();
            self.heap.push(slot);
            arena[slot].heap_index = index as i64;
            self.sift_up(arena, index);
        } else {
            let index = arena[slot].heap_index as usize;
            self.fix(arena, index);
        }
    }

    /// Extracts the head, setting its `heap_index` back to [`NOT_IN_HEAP`].
    pub fn dequeue(&mut self, arena: &mut [StoreDetail]) -> Option<usize> {
        if self.heap.is_empty() {
            return None;
        }
        let head = self.heap[0];
        let last = self.heap.pop().unwrap();
        arena[head].heap_index = NOT_IN_HEAP;
        if !self.heap.is_empty() {
            self.heap[0] = last;
            arena[last].heap_index = 0;
            self.sift_down(arena, 0);
        }
        Some(head)
    }

    fn fix(&mut self, arena: &mut [StoreDetail], index: usize) {
        if index > 0 && self.less(arena, index, parent(index)) {
            self.sift_up(arena, index);
        } else {
            self.sift_down(arena, index);
        }
    }

    fn sift_up(&mut self, arena: &mut [StoreDetail], mut index: usize) {
        while index > 0 {
            let p = parent(index);
            if !self.less(arena, index, p) {
                break;
            }
            self.swap(arena, index, p);
            index = p;
        }
    }

    fn sift_down(&mut self, arena: &mut [StoreDetail], mut index: usize) {
        let len = self.heap.len();
        loop {
            let (left, right) = (left_child(index), right_child(index));
            let mut smallest = index;
            if left < len && self.less(arena, left, smallest) {
                smallest = left;
            }
            if right < len && self.less(arena, right, smallest) {
                smallest = right;
            }
            if smallest == index {
                break;
            }
            self.swap(arena, index, smallest);
            index = smallest;
        }
    }

    fn less(&self, arena: &[StoreDetail], i: usize, j: usize) -> bool {
        arena[self.heap[i]].last_updated_time < arena[self.heap[j]].last_updated_time
    }

    fn swap(&mut self, arena: &mut [StoreDetail], i: usize, j: usize) {
        self.heap.swap(i, j);
        arena[self.heap[i]].heap_index = i as i64;
        arena[self.heap[j]].heap_index = j as i64;
    }

    #[cfg(test)]
    fn is_valid(&self, arena: &[StoreDetail]) -> bool {
        for i in 1..self.heap.len() {
            if self.less(arena, i, parent(i)) {
                return false;
            }
        }
        self.heap
            .iter()
            .enumerate()
            .all(|(i, &slot)| arena[slot].heap_index == i as i64)
    }
}

fn parent(i: usize) -> usize {
    (i - 1) / 2
}

fn left_child(i: usize) -> usize {
    2 * i + 1
}

fn right_child(i: usize) -> usize {
    2 * i + 2
}
