use std::{
    mem,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

use log::{info, trace, warn};
use parking_lot::{Condvar, Mutex};

use super::{
    task::{Task, TaskId},
    JobError, PoolConfig, WorkDeque,
};

/// Per-worker execution counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    /// Tasks this worker ran, whether popped locally or stolen
    pub executed: u64,
    /// Tasks this worker took from the top of a peer's deque
    pub stolen: u64,
}

#[derive(Default)]
struct WorkerCounters {
    executed: AtomicU64,
    stolen: AtomicU64,
}

struct PoolState {
    // submitted and not yet retired
    active: usize,
    // sitting in some deque and not yet claimed by a worker
    queued: usize,
    shutdown: bool,
    next_task_id: u64,
    next_worker: usize,
}

struct Shared {
    deques: Vec<WorkDeque<Task>>,
    counters: Vec<WorkerCounters>,
    state: Mutex<PoolState>,
    signal: Condvar,
}

/// A fixed pool of OS threads, each owning a bounded work-stealing deque.
///
/// Workers pop their own deque from the bottom, then steal from peers' tops
/// starting with the next worker index, then sleep until work arrives.
/// The pool decides only when and where a task runs. Callers that need
/// reproducible output split work into disjoint index ranges up front (see
/// [`partition_ranges`](crate::packed::partition_ranges)).
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<JoinHandle<()>>,
    deque_capacity: usize,
}

impl ThreadPool {
    pub fn new(config: PoolConfig) -> Result<Self, JobError> {
        config.validate()?;

        let shared = Arc::new(Shared {
            deques: (0..config.worker_count)
                .map(|_| WorkDeque::new(config.deque_capacity))
                .collect(),
            counters: (0..config.worker_count)
                .map(|_| WorkerCounters::default())
                .collect(),
            state: Mutex::new(PoolState {
                active: 0,
                queued: 0,
                shutdown: false,
                next_task_id: 1,
                next_worker: 0,
            }),
            signal: Condvar::new(),
        });

        let mut pool = Self {
            shared,
            workers: Vec::with_capacity(config.worker_count),
            deque_capacity: config.deque_capacity,
        };

        for index in 0..config.worker_count {
            let worker_shared = Arc::clone(&pool.shared);
            let spawned = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name_prefix, index))
                .spawn(move || worker_main(worker_shared, index));
            match spawned {
                Ok(handle) => pool.workers.push(handle),
                Err(error) => {
                    pool.shutdown();
                    return Err(JobError::SpawnFailed {
                        worker: index,
                        message: error.to_string(),
                    });
                }
            }
        }

        info!(
            "ThreadPool started: {} workers, deque capacity {}",
            config.worker_count, config.deque_capacity
        );

        Ok(pool)
    }

    pub fn worker_count(&self) -> usize {
        self.shared.deques.len()
    }

    /// Tasks submitted and not yet finished.
    pub fn active(&self) -> usize {
        self.shared.state.lock().active
    }

    /// Queues a task on the next worker in round-robin order, moving on to
    /// later workers if that deque is full.
    pub fn submit<F>(&self, task: F) -> Result<TaskId, JobError>
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.shared.state.lock();
        if state.shutdown {
            return Err(JobError::ShutDown);
        }
        let worker_count = self.worker_count();
        let first = state.next_worker;
        let id = TaskId::new(state.next_task_id);
        let mut task = Task {
            id,
            run: Box::new(task),
        };
        for offset in 0..worker_count {
            let worker = (first + offset) % worker_count;
            match self.shared.deques[worker].push_bottom(task) {
                Ok(()) => {
                    state.next_worker = (worker + 1) % worker_count;
                    Self::enqueued(&mut state);
                    self.shared.signal.notify_all();
                    return Ok(id);
                }
                Err(returned) => task = returned,
            }
        }
        Err(JobError::QueueFull {
            capacity: self.deque_capacity,
        })
    }

    /// Queues a task on one specific worker's deque.
    pub fn submit_to<F>(&self, worker: usize, task: F) -> Result<TaskId, JobError>
    where
        F: FnOnce() + Send + 'static,
    {
        if worker >= self.worker_count() {
            return Err(JobError::WorkerOutOfRange {
                worker,
                worker_count: self.worker_count(),
            });
        }
        let mut state = self.shared.state.lock();
        if state.shutdown {
            return Err(JobError::ShutDown);
        }
        let id = TaskId::new(state.next_task_id);
        let task = Task {
            id,
            run: Box::new(task),
        };
        if self.shared.deques[worker].push_bottom(task).is_err() {
            return Err(JobError::QueueFull {
                capacity: self.deque_capacity,
            });
        }
        Self::enqueued(&mut state);
        self.shared.signal.notify_all();
        Ok(id)
    }

    fn enqueued(state: &mut PoolState) {
        state.next_task_id += 1;
        state.active += 1;
        state.queued += 1;
    }

    /// Blocks until every submitted task has finished.
    ///
    /// Must not be called from inside a pool task: that task counts as
    /// active, so the wait would never end.
    pub fn wait(&self) {
        let mut state = self.shared.state.lock();
        while state.active > 0 {
            self.shared.signal.wait(&mut state);
        }
    }

    pub fn stats(&self) -> Vec<PoolStats> {
        self.shared
            .counters
            .iter()
            .map(|counters| PoolStats {
                executed: counters.executed.load(Ordering::Relaxed),
                stolen: counters.stolen.load(Ordering::Relaxed),
            })
            .collect()
    }

    /// Stops accepting tasks, lets workers drain what is already queued,
    /// then joins every worker thread other than the calling one. Calling it
    /// again does nothing.
    pub fn shutdown(&mut self) {
        if self.workers.is_empty() {
            return;
        }
        {
            let mut state = self.shared.state.lock();
            state.shutdown = true;
        }
        self.shared.signal.notify_all();

        // Dropped from inside a task, the current worker cannot join itself.
        // It exits on its own once that task returns.
        let current = thread::current().id();
        for handle in mem::take(&mut self.workers) {
            if handle.thread().id() == current {
                continue;
            }
            if handle.join().is_err() {
                warn!("ThreadPool worker exited abnormally");
            }
        }

        let executed: u64 = self.stats().iter().map(|stats| stats.executed).sum();
        info!("ThreadPool shut down after {} tasks", executed);
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn worker_main(shared: Arc<Shared>, index: usize) {
    loop {
        {
            let mut state = shared.state.lock();
            while state.queued == 0 && !state.shutdown {
                shared.signal.wait(&mut state);
            }
            if state.queued == 0 {
                return;
            }
            state.queued -= 1;
        }

        // The claim above guarantees a task is waiting in some deque.
        let task = loop {
            if let Some(task) = find_task(&shared, index) {
                break task;
            }
            thread::yield_now();
        };

        let Task { id, run } = task;
        if panic::catch_unwind(AssertUnwindSafe(run)).is_err() {
            warn!("Worker {} caught a panic in {}", index, id);
        }
        shared.counters[index]
            .executed
            .fetch_add(1, Ordering::Relaxed);

        let mut state = shared.state.lock();
        state.active -= 1;
        if state.active == 0 {
            shared.signal.notify_all();
        }
    }
}

fn find_task(shared: &Shared, index: usize) -> Option<Task> {
    if let Some(task) = shared.deques[index].pop_bottom() {
        return Some(task);
    }
    let worker_count = shared.deques.len();
    for offset in 1..worker_count {
        let victim = (index + offset) % worker_count;
        if let Some(task) = shared.deques[victim].steal_top() {
            trace!("Worker {} stole {} from worker {}", index, task.id, victim);
            shared.counters[index].stolen.fetch_add(1, Ordering::Relaxed);
            return Some(task);
        }
    }
    None
}
