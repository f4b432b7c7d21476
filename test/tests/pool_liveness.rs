/// Work-stealing liveness: every submitted task runs exactly once and
/// wait() returns, however unevenly work is submitted.

use std::{
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        mpsc, Arc,
    },
    thread,
    time::Duration,
};

use lockstep_shared::{PoolConfig, ThreadPool};
use lockstep_test::init_logging;

fn counters(count: usize) -> Arc<Vec<AtomicUsize>> {
    Arc::new((0..count).map(|_| AtomicUsize::new(0)).collect())
}

#[test]
fn all_tasks_on_worker_zero() {
    init_logging();

    const TASKS: usize = 200;
    let pool = ThreadPool::new(PoolConfig {
        worker_count: 4,
        deque_capacity: 256,
        thread_name_prefix: "liveness".to_string(),
    })
    .unwrap();
    let runs = counters(TASKS);

    for task in 0..TASKS {
        let runs = Arc::clone(&runs);
        pool.submit_to(0, move || {
            runs[task].fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }
    pool.wait();

    assert!(runs.iter().all(|count| count.load(Ordering::SeqCst) == 1));
    assert_eq!(pool.active(), 0);
    let stats = pool.stats();
    assert_eq!(stats.len(), 4);
    assert_eq!(
        stats.iter().map(|stats| stats.executed).sum::<u64>(),
        TASKS as u64
    );
    // only worker 0 owns tasks; anything run elsewhere was stolen
    for (worker, stats) in stats.iter().enumerate().skip(1) {
        assert_eq!(stats.executed, stats.stolen, "worker {}", worker);
    }
}

#[test]
fn round_robin_submission_and_repeated_waits() {
    let pool = ThreadPool::new(PoolConfig::with_workers(3)).unwrap();
    let total = Arc::new(AtomicUsize::new(0));

    for round in 1..=5 {
        for _ in 0..50 {
            let total = Arc::clone(&total);
            pool.submit(move || {
                total.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
        pool.wait();
        assert_eq!(total.load(Ordering::SeqCst), round * 50);
    }
}

#[test]
fn tasks_may_submit_more_tasks() {
    let pool = Arc::new(ThreadPool::new(PoolConfig::with_workers(2)).unwrap());
    let runs = Arc::new(AtomicUsize::new(0));

    for _ in 0..10 {
        let inner_pool = Arc::clone(&pool);
        let runs = Arc::clone(&runs);
        pool.submit(move || {
            runs.fetch_add(1, Ordering::SeqCst);
            let runs = Arc::clone(&runs);
            inner_pool
                .submit(move || {
                    runs.fetch_add(1, Ordering::SeqCst);
                })
                .unwrap();
        })
        .unwrap();
    }
    pool.wait();
    assert_eq!(runs.load(Ordering::SeqCst), 20);
}

#[test]
fn wait_on_idle_pool_returns() {
    let pool = ThreadPool::new(PoolConfig::with_workers(2)).unwrap();
    pool.wait();
    assert_eq!(pool.active(), 0);
}

#[test]
fn drop_joins_workers_after_draining() {
    let runs = Arc::new(AtomicUsize::new(0));
    {
        let pool = ThreadPool::new(PoolConfig::with_workers(2)).unwrap();
        for _ in 0..30 {
            let runs = Arc::clone(&runs);
            pool.submit(move || {
                runs.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        }
    }
    assert_eq!(runs.load(Ordering::SeqCst), 30);
}

#[test]
fn last_handle_dropped_inside_a_task() {
    init_logging();

    let pool = Arc::new(ThreadPool::new(PoolConfig::with_workers(2)).unwrap());
    let slow_done = Arc::new(AtomicBool::new(false));
    let (go_sender, go_receiver) = mpsc::channel::<()>();
    let (done_sender, done_receiver) = mpsc::channel::<bool>();

    {
        let slow_done = Arc::clone(&slow_done);
        pool.submit_to(1, move || {
            thread::sleep(Duration::from_millis(50));
            slow_done.store(true, Ordering::SeqCst);
        })
        .unwrap();
    }
    {
        let inner_pool = Arc::clone(&pool);
        let slow_done = Arc::clone(&slow_done);
        pool.submit_to(0, move || {
            go_receiver.recv().unwrap();
            // runs ThreadPool::drop on this worker
            drop(inner_pool);
            done_sender.send(slow_done.load(Ordering::SeqCst)).unwrap();
        })
        .unwrap();
    }

    drop(pool);
    go_sender.send(()).unwrap();

    // a panic inside drop would unwind past the send and disconnect the channel
    let other_worker_joined = done_receiver
        .recv_timeout(Duration::from_secs(10))
        .expect("drop from a worker should complete");
    assert!(other_worker_joined);
}
