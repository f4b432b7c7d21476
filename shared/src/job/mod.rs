//! # Work-stealing pool
//!
//! Schedules independent tasks over a fixed set of worker threads. Nothing
//! here affects the bytes produced by the packed view or delta codec.

mod config;
mod deque;
mod error;
mod pool;
mod task;

pub use config::PoolConfig;
pub use deque::WorkDeque;
pub use error::JobError;
pub use pool::{PoolStats, ThreadPool};
pub use task::TaskId;
