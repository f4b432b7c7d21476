/// PROPERTY-BASED TESTS: Deterministic ordering and reduction
///
/// Key invariants:
/// 1. Heap pop order depends only on the keys, never on push order
/// 2. Merging buckets twice changes nothing
/// 3. Reductions give the same answer for any input permutation

use proptest::prelude::*;

use lockstep_shared::{
    dist_merge_vec, hist_merge, hist_merge_vec, max_i64, min_u64, order_sort, sum_i64, sum_u64,
    DetHeap, DistBucket, HistBucket, KeyedI64, KeyedU64, OrderItem,
};

fn item_strategy() -> impl Strategy<Value = OrderItem> {
    (0u64..4, 0u64..4, 0u64..4).prop_map(|(p, s, x)| OrderItem::new(p, s, x))
}

fn drain(heap: &mut DetHeap) -> Vec<OrderItem> {
    let mut out = Vec::new();
    while let Ok(item) = heap.pop() {
        out.push(item);
    }
    out
}

fn heap_order(items: &[OrderItem]) -> Vec<OrderItem> {
    let mut storage = vec![OrderItem::default(); items.len()];
    let mut heap = DetHeap::new(&mut storage);
    for item in items {
        heap.push(*item).unwrap();
    }
    drain(&mut heap)
}

fn keyed_u64(values: &[(OrderItem, u64)]) -> Vec<KeyedU64> {
    values
        .iter()
        .map(|(key, value)| KeyedU64 { key: *key, value: *value })
        .collect()
}

proptest! {
    #[test]
    fn prop_heap_ignores_push_order(
        items in prop::collection::vec(item_strategy(), 0..24)
            .prop_flat_map(|items| (Just(items.clone()), Just(items).prop_shuffle())),
    ) {
        let (first, second) = items;
        prop_assert_eq!(heap_order(&first), heap_order(&second));
    }

    #[test]
    fn prop_heap_pops_sorted(items in prop::collection::vec(item_strategy(), 0..24)) {
        let mut sorted = items.clone();
        order_sort(&mut sorted);
        prop_assert_eq!(heap_order(&items), sorted);
    }

    #[test]
    fn prop_hist_merge_is_idempotent(
        raw in prop::collection::vec((item_strategy(), 0u64..100), 0..32),
    ) {
        let mut buckets: Vec<HistBucket> = raw
            .iter()
            .map(|(key, count)| HistBucket { key: *key, count: *count })
            .collect();
        let total: u64 = buckets.iter().map(|bucket| bucket.count).sum();

        hist_merge_vec(&mut buckets);
        let once = buckets.clone();
        hist_merge_vec(&mut buckets);

        prop_assert_eq!(&buckets, &once);
        prop_assert_eq!(buckets.iter().map(|bucket| bucket.count).sum::<u64>(), total);
        prop_assert!(buckets.windows(2).all(|pair| pair[0].key < pair[1].key));
    }

    #[test]
    fn prop_dist_merge_is_order_independent(
        raw in prop::collection::vec((item_strategy(), 0u64..100, 0u64..100), 0..32)
            .prop_flat_map(|raw| (Just(raw.clone()), Just(raw).prop_shuffle())),
    ) {
        let to_buckets = |raw: &[(OrderItem, u64, u64)]| -> Vec<DistBucket> {
            raw.iter()
                .map(|(key, weight, count)| DistBucket { key: *key, weight: *weight, count: *count })
                .collect()
        };
        let mut first = to_buckets(&raw.0[..]);
        let mut second = to_buckets(&raw.1[..]);
        dist_merge_vec(&mut first);
        dist_merge_vec(&mut second);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_sums_ignore_input_order(
        values in prop::collection::vec((item_strategy(), any::<u64>()), 0..32)
            .prop_flat_map(|values| (Just(values.clone()), Just(values).prop_shuffle())),
    ) {
        let mut a = keyed_u64(&values.0);
        let mut b = keyed_u64(&values.1);
        prop_assert_eq!(sum_u64(&mut a), sum_u64(&mut b));
    }
}

#[test]
fn heap_example_pops_payloads_in_key_order() {
    let items = [
        OrderItem::new(2, 5, 1),
        OrderItem::new(1, 9, 3),
        OrderItem::new(2, 5, 2),
        OrderItem::new(3, 0, 4),
    ];
    let permutations = [[0, 1, 2, 3], [3, 2, 1, 0], [2, 0, 3, 1], [1, 3, 0, 2]];
    for order in permutations {
        let pushed: Vec<OrderItem> = order.iter().map(|i| items[*i]).collect();
        let payloads: Vec<u64> = heap_order(&pushed).iter().map(|item| item.payload).collect();
        assert_eq!(payloads, vec![3, 1, 2, 4]);
    }
}

#[test]
fn already_merged_histogram_keeps_its_length() {
    let mut buckets = [
        HistBucket { key: OrderItem::new(1, 0, 0), count: 2 },
        HistBucket { key: OrderItem::new(2, 0, 0), count: 5 },
    ];
    assert_eq!(hist_merge(&mut buckets), 2);
    assert_eq!(buckets[0].count, 2);
    assert_eq!(buckets[1].count, 5);
}

#[test]
fn extremes_and_signed_sums() {
    let mut unsigned = vec![
        KeyedU64 { key: OrderItem::new(3, 0, 0), value: 7 },
        KeyedU64 { key: OrderItem::new(1, 0, 0), value: 7 },
        KeyedU64 { key: OrderItem::new(2, 0, 0), value: 9 },
    ];
    // equal minimums resolve to the smallest key
    assert_eq!(min_u64(&mut unsigned).unwrap().key, OrderItem::new(1, 0, 0));

    let mut signed = vec![
        KeyedI64 { key: OrderItem::new(0, 0, 1), value: -5 },
        KeyedI64 { key: OrderItem::new(0, 0, 2), value: 12 },
        KeyedI64 { key: OrderItem::new(0, 0, 3), value: -2 },
    ];
    assert_eq!(sum_i64(&mut signed), 5);
    assert_eq!(max_i64(&mut signed).unwrap().value, 12);
}
