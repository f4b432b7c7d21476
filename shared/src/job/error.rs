use thiserror::Error;

use crate::status;

/// Errors that can occur while configuring or feeding a worker pool
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobError {
    /// A pool needs at least one worker
    #[error("Pool worker_count must be at least 1")]
    ZeroWorkers,

    /// A ring buffer reserves one slot, so capacity below 2 holds nothing
    #[error("Deque capacity {capacity} is too small: must be at least 2")]
    DequeTooSmall { capacity: usize },

    /// `submit_to` named a worker that does not exist
    #[error("Worker {worker} is out of range: pool has {worker_count} workers")]
    WorkerOutOfRange { worker: usize, worker_count: usize },

    /// The target deque (or every deque, for round-robin submission) is full
    #[error("Worker queue is full: {capacity} slots, one reserved")]
    QueueFull { capacity: usize },

    /// Tasks cannot be submitted after shutdown has begun
    #[error("Pool has been shut down")]
    ShutDown,

    /// The OS refused to start a worker thread
    #[error("Failed to spawn worker {worker}: {message}")]
    SpawnFailed { worker: usize, message: String },
}

impl JobError {
    pub fn code(&self) -> i32 {
        match self {
            JobError::QueueFull { .. } => status::FULL,
            JobError::ZeroWorkers
            | JobError::DequeTooSmall { .. }
            | JobError::WorkerOutOfRange { .. }
            | JobError::ShutDown
            | JobError::SpawnFailed { .. } => status::INVALID,
        }
    }
}
