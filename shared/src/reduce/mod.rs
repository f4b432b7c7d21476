//! # Deterministic reduction
//!
//! Every reduction sorts its input in place by the embedded [`OrderItem`]
//! before folding, so the order of accumulation is fixed no matter how the
//! items were produced (for example, by several workers appending into one
//! buffer). Histogram and distribution merges then collapse adjacent equal
//! keys and return the compacted length; the tail past that length is
//! unspecified and must be ignored by the caller.
//!
//! Sums use two's-complement wrapping addition. Bucket counts and weights
//! saturate.

use crate::ordering::{order_item_cmp, stable_sort_by, OrderItem};

pub mod error;

pub use error::ReduceError;

/// Anything carrying an [`OrderItem`] sort key.
pub trait Keyed {
    fn key(&self) -> &OrderItem;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyedU64 {
    pub key: OrderItem,
    pub value: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyedI64 {
    pub key: OrderItem,
    pub value: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HistBucket {
    pub key: OrderItem,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DistBucket {
    pub key: OrderItem,
    pub weight: u64,
    pub count: u64,
}

macro_rules! impl_keyed {
    ($($ty:ty),*) => {
        $(
            impl Keyed for $ty {
                fn key(&self) -> &OrderItem {
                    &self.key
                }
            }
        )*
    };
}

impl_keyed!(KeyedU64, KeyedI64, HistBucket, DistBucket);

impl Keyed for OrderItem {
    fn key(&self) -> &OrderItem {
        self
    }
}

pub fn sort_keyed<T: Keyed>(items: &mut [T]) {
    stable_sort_by(items, |a, b| order_item_cmp(Some(a.key()), Some(b.key())));
}

pub fn sort_u64(items: &mut [KeyedU64]) {
    sort_keyed(items);
}

pub fn sort_i64(items: &mut [KeyedI64]) {
    sort_keyed(items);
}

pub fn sort_hist(items: &mut [HistBucket]) {
    sort_keyed(items);
}

pub fn sort_dist(items: &mut [DistBucket]) {
    sort_keyed(items);
}

pub fn sum_u64(items: &mut [KeyedU64]) -> u64 {
    sort_keyed(items);
    items
        .iter()
        .fold(0u64, |total, item| total.wrapping_add(item.value))
}

pub fn sum_i64(items: &mut [KeyedI64]) -> i64 {
    sort_keyed(items);
    items
        .iter()
        .fold(0i64, |total, item| total.wrapping_add(item.value))
}

/// Returns the item holding the smallest value. Among equal values the one
/// with the smallest key wins.
pub fn min_u64(items: &mut [KeyedU64]) -> Result<KeyedU64, ReduceError> {
    extreme(items, "min", |candidate, best| candidate.value < best.value)
}

pub fn max_u64(items: &mut [KeyedU64]) -> Result<KeyedU64, ReduceError> {
    extreme(items, "max", |candidate, best| candidate.value > best.value)
}

pub fn min_i64(items: &mut [KeyedI64]) -> Result<KeyedI64, ReduceError> {
    extreme(items, "min", |candidate, best| candidate.value < best.value)
}

pub fn max_i64(items: &mut [KeyedI64]) -> Result<KeyedI64, ReduceError> {
    extreme(items, "max", |candidate, best| candidate.value > best.value)
}

fn extreme<T, F>(items: &mut [T], operation: &'static str, replaces: F) -> Result<T, ReduceError>
where
    T: Keyed + Copy,
    F: Fn(&T, &T) -> bool,
{
    sort_keyed(items);
    let Some((first, rest)) = items.split_first() else {
        return Err(ReduceError::Empty { operation });
    };
    let mut best = *first;
    for item in rest {
        if replaces(item, &best) {
            best = *item;
        }
    }
    Ok(best)
}

/// Sorts, then folds every run of equal keys into its first bucket.
/// Returns the new length.
pub fn hist_merge(items: &mut [HistBucket]) -> usize {
    merge_runs(items, |into, from| {
        into.count = into.count.saturating_add(from.count);
    })
}

pub fn dist_merge(items: &mut [DistBucket]) -> usize {
    merge_runs(items, |into, from| {
        into.weight = into.weight.saturating_add(from.weight);
        into.count = into.count.saturating_add(from.count);
    })
}

pub fn hist_merge_vec(items: &mut Vec<HistBucket>) {
    let len = hist_merge(items);
    items.truncate(len);
}

pub fn dist_merge_vec(items: &mut Vec<DistBucket>) {
    let len = dist_merge(items);
    items.truncate(len);
}

fn merge_runs<T, F>(items: &mut [T], mut combine: F) -> usize
where
    T: Keyed + Copy,
    F: FnMut(&mut T, &T),
{
    if items.is_empty() {
        return 0;
    }
    sort_keyed(items);
    let mut write = 0;
    for read in 1..items.len() {
        if items[read].key() == items[write].key() {
            let from = items[read];
            combine(&mut items[write], &from);
        } else {
            write += 1;
            items[write] = items[read];
        }
    }
    write + 1
}
