//! # Deterministic ordering
//!
//! [`OrderItem`] is the total-order key every deterministic container in this
//! crate sorts by: `primary`, then `secondary`, then `payload`. Sorting is a
//! stable insertion sort, which is allocation-free and, for the per-tick
//! working-set sizes it is used on, fast enough.

use std::cmp::Ordering;

pub mod error;
pub mod heap;

pub use error::OrderError;
pub use heap::DetHeap;

/// A three-level sort key. The derived ordering is lexicographic over the
/// fields in declaration order, which is exactly [`order_item_cmp`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct OrderItem {
    pub primary: u64,
    pub secondary: u64,
    pub payload: u64,
}

impl OrderItem {
    pub const fn new(primary: u64, secondary: u64, payload: u64) -> Self {
        Self {
            primary,
            secondary,
            payload,
        }
    }
}

/// Compares two optional items. A missing item sorts before a present one.
pub fn order_item_cmp(a: Option<&OrderItem>, b: Option<&OrderItem>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a
            .primary
            .cmp(&b.primary)
            .then(a.secondary.cmp(&b.secondary))
            .then(a.payload.cmp(&b.payload)),
    }
}

/// Same as [`order_item_cmp`] but as the `-1 / 0 / 1` integer some callers
/// store or hash.
pub fn order_item_cmp_i32(a: Option<&OrderItem>, b: Option<&OrderItem>) -> i32 {
    match order_item_cmp(a, b) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Stable insertion sort. Elements that compare equal keep their relative
/// order.
pub fn stable_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

pub fn order_sort(items: &mut [OrderItem]) {
    stable_sort_by(items, |a, b| order_item_cmp(Some(a), Some(b)));
}
