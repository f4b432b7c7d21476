use thiserror::Error;

use crate::status;

/// Errors that can occur during deterministic reductions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReduceError {
    /// min/max requested over no items
    #[error("Cannot take the {operation} of an empty input")]
    Empty { operation: &'static str },
}

impl ReduceError {
    pub fn code(&self) -> i32 {
        match self {
            ReduceError::Empty { .. } => status::EMPTY,
        }
    }
}
