use std::{num::NonZeroUsize, thread};

use super::JobError;

/// Contains config properties which will be used by a [`ThreadPool`]
///
/// [`ThreadPool`]: super::ThreadPool
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads, fixed for the life of the pool
    pub worker_count: usize,
    /// Slots per worker deque. One slot is reserved, so each worker can
    /// hold `deque_capacity - 1` queued tasks.
    pub deque_capacity: usize,
    /// Worker threads are named `{thread_name_prefix}-{index}`
    pub thread_name_prefix: String,
}

impl PoolConfig {
    pub fn with_workers(worker_count: usize) -> Self {
        Self {
            worker_count,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), JobError> {
        if self.worker_count == 0 {
            return Err(JobError::ZeroWorkers);
        }
        if self.deque_capacity < 2 {
            return Err(JobError::DequeTooSmall {
                capacity: self.deque_capacity,
            });
        }
        Ok(())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            worker_count: thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
            deque_capacity: 256,
            thread_name_prefix: "lockstep-worker".to_string(),
        }
    }
}
