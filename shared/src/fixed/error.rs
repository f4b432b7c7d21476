use thiserror::Error;

use crate::status;

/// Errors that can occur during checked fixed-point conversions.
/// The arithmetic itself never fails; it saturates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixedError {
    /// Integer does not fit the integer part of the target format
    #[error("Integer {value} is out of range for {format} (representable: {min}..={max})")]
    OutOfRange {
        format: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
}

impl FixedError {
    pub fn code(&self) -> i32 {
        match self {
            FixedError::OutOfRange { .. } => status::INVALID,
        }
    }
}
