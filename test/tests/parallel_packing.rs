/// Packing disjoint index ranges on a worker pool gives the same bytes as a
/// single-threaded rebuild, however the pool schedules the tasks.

use lockstep_shared::{PoolConfig, ThreadPool};
use lockstep_test::{assert_bytes_eq, init_logging, pack_all, pack_parallel, TestWorld};

#[test]
fn parallel_ranges_match_rebuild() {
    init_logging();

    let pool = ThreadPool::new(PoolConfig::with_workers(4)).unwrap();
    for (count, parts) in [(0, 3), (1, 4), (17, 4), (100, 7), (64, 64)] {
        let world = TestWorld::generate(count, count as u64 + 11);
        let expected = pack_all(&world, 1);
        let parallel = pack_parallel(&world, &pool, parts);
        assert_bytes_eq!(parallel, expected);
    }
}

#[test]
fn repeated_parallel_runs_agree() {
    let pool = ThreadPool::new(PoolConfig::with_workers(3)).unwrap();
    let world = TestWorld::generate(250, 5);
    let first = pack_parallel(&world, &pool, 9);
    for _ in 0..5 {
        let again = pack_parallel(&world, &pool, 9);
        assert_bytes_eq!(again, first);
    }
}
