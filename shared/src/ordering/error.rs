use thiserror::Error;

use crate::status;

/// Errors that can occur during deterministic heap operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    /// Push attempted on a heap whose storage is exhausted
    #[error("Heap is full (capacity {capacity})")]
    Full { capacity: usize },

    /// Pop or peek attempted on an empty heap
    #[error("Heap is empty")]
    Empty,

    /// Heap constructed over inconsistent storage
    #[error("Invalid heap storage: count {count} exceeds capacity {capacity}")]
    InvalidStorage { count: usize, capacity: usize },
}

impl OrderError {
    pub fn code(&self) -> i32 {
        match self {
            OrderError::Full { .. } => status::FULL,
            OrderError::Empty => status::EMPTY,
            OrderError::InvalidStorage { .. } => status::INVALID,
        }
    }
}
