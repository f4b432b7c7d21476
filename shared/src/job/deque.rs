use parking_lot::Mutex;

struct Ring<T> {
    slots: Vec<Option<T>>,
    top: usize,
    bottom: usize,
}

impl<T> Ring<T> {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn len(&self) -> usize {
        (self.bottom + self.capacity() - self.top) % self.capacity()
    }
}

/// Bounded circular double-ended queue.
///
/// The owning worker pushes and pops at the bottom; any worker may steal
/// from the top. Slots are allocated once, and one slot stays empty so a
/// full ring can be told apart from an empty one.
pub struct WorkDeque<T> {
    ring: Mutex<Ring<T>>,
}

impl<T> WorkDeque<T> {
    /// # Panics
    /// Panics if `capacity < 2`; pool construction validates this first.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "WorkDeque capacity must be at least 2");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            ring: Mutex::new(Ring {
                slots,
                top: 0,
                bottom: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.ring.lock().capacity()
    }

    pub fn len(&self) -> usize {
        self.ring.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Hands the item back when the ring is full.
    pub fn push_bottom(&self, item: T) -> Result<(), T> {
        let mut ring = self.ring.lock();
        if ring.len() == ring.capacity() - 1 {
            return Err(item);
        }
        let bottom = ring.bottom;
        ring.slots[bottom] = Some(item);
        ring.bottom = (bottom + 1) % ring.capacity();
        Ok(())
    }

    /// Most recently pushed item.
    pub fn pop_bottom(&self) -> Option<T> {
        let mut ring = self.ring.lock();
        if ring.len() == 0 {
            return None;
        }
        let bottom = (ring.bottom + ring.capacity() - 1) % ring.capacity();
        ring.bottom = bottom;
        ring.slots[bottom].take()
    }

    /// Oldest item.
    pub fn steal_top(&self) -> Option<T> {
        let mut ring = self.ring.lock();
        if ring.len() == 0 {
            return None;
        }
        let top = ring.top;
        ring.top = (top + 1) % ring.capacity();
        ring.slots[top].take()
    }
}
