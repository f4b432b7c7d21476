use super::{order_item_cmp, OrderError, OrderItem};
use std::cmp::Ordering;

/// Binary min-heap over caller-owned storage.
///
/// Ties are broken only by the full [`OrderItem`] key, never by insertion
/// order, so the pop sequence of distinct items does not depend on the order
/// they were pushed in. The heap never allocates: its capacity is the length
/// of the slice it was built over.
pub struct DetHeap<'a> {
    items: &'a mut [OrderItem],
    count: usize,
}

impl<'a> DetHeap<'a> {
    /// Creates an empty heap over `storage`.
    pub fn new(storage: &'a mut [OrderItem]) -> Self {
        Self {
            items: storage,
            count: 0,
        }
    }

    /// Adopts the first `count` items of `storage` and heapifies them.
    pub fn from_storage(storage: &'a mut [OrderItem], count: usize) -> Result<Self, OrderError> {
        if count > storage.len() {
            return Err(OrderError::InvalidStorage {
                count,
                capacity: storage.len(),
            });
        }
        let mut heap = Self {
            items: storage,
            count,
        };
        for index in (0..count / 2).rev() {
            heap.sift_down(index);
        }
        Ok(heap)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn clear(&mut self) {
        self.count = 0;
    }

    /// Live items in heap order (not sorted order).
    pub fn as_slice(&self) -> &[OrderItem] {
        &self.items[..self.count]
    }

    pub fn push(&mut self, item: OrderItem) -> Result<(), OrderError> {
        if self.count == self.items.len() {
            return Err(OrderError::Full {
                capacity: self.items.len(),
            });
        }
        self.items[self.count] = item;
        self.count += 1;
        self.sift_up(self.count - 1);
        Ok(())
    }

    pub fn peek(&self) -> Result<&OrderItem, OrderError> {
        if self.count == 0 {
            return Err(OrderError::Empty);
        }
        Ok(&self.items[0])
    }

    pub fn pop(&mut self) -> Result<OrderItem, OrderError> {
        if self.count == 0 {
            return Err(OrderError::Empty);
        }
        let top = self.items[0];
        self.count -= 1;
        if self.count > 0 {
            self.items[0] = self.items[self.count];
            self.sift_down(0);
        }
        Ok(top)
    }

    fn less(&self, a: usize, b: usize) -> bool {
        order_item_cmp(Some(&self.items[a]), Some(&self.items[b])) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.less(index, parent) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        loop {
            let left = index * 2 + 1;
            let right = left + 1;
            let mut smallest = index;
            if left < self.count && self.less(left, smallest) {
                smallest = left;
            }
            if right < self.count && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == index {
                return;
            }
            self.items.swap(index, smallest);
            index = smallest;
        }
    }
}
