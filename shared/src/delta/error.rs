use thiserror::Error;

use lockstep_serde::SerdeErr;

use crate::status;

/// Errors that can occur while building, parsing or applying a delta
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    /// Baseline and current views describe different views
    #[error("View id mismatch: baseline is view {baseline}, current is view {current}")]
    IdMismatch { baseline: u64, current: u64 },

    /// Baseline and current views have different entity counts or strides
    #[error("Shape mismatch: baseline has {baseline_entities} entities of stride {baseline_stride}, current has {current_entities} entities of stride {current_stride}")]
    ShapeMismatch {
        baseline_entities: u32,
        baseline_stride: usize,
        current_entities: u32,
        current_stride: usize,
    },

    /// Baseline row bytes do not match the shape recorded in a delta header
    #[error("Baseline holds {provided} bytes but the delta describes {expected}")]
    BaselineSizeMismatch { expected: usize, provided: usize },

    /// Output buffer cannot hold the encoded delta or the reconstructed rows
    #[error("Insufficient capacity: {required} bytes required, {capacity} available")]
    InsufficientCapacity { required: usize, capacity: usize },

    /// Row stride does not fit the 32-bit header field, or a total overflowed
    #[error("Delta for {entity_count} entities of stride {stride} exceeds addressable size")]
    SizeOverflow { entity_count: u32, stride: usize },

    /// Delta byte length disagrees with its header and bitmask
    #[error("Malformed delta: expected {expected} bytes, found {provided}")]
    LengthMismatch { expected: usize, provided: usize },

    /// Bitmask marks an entity beyond the header's entity count
    #[error("Malformed delta: bitmask marks entity {entity} but only {entity_count} exist")]
    StrayBitmaskBit { entity: u32, entity_count: u32 },

    /// The delta stream ended early
    #[error("Malformed delta: {0}")]
    Truncated(#[from] SerdeErr),
}

impl DeltaError {
    pub fn code(&self) -> i32 {
        match self {
            DeltaError::IdMismatch { .. } => status::ID_MISMATCH,
            DeltaError::ShapeMismatch { .. } | DeltaError::BaselineSizeMismatch { .. } => {
                status::SHAPE_MISMATCH
            }
            DeltaError::InsufficientCapacity { .. } => status::INSUFFICIENT_CAPACITY,
            DeltaError::SizeOverflow { .. }
            | DeltaError::LengthMismatch { .. }
            | DeltaError::StrayBitmaskBit { .. }
            | DeltaError::Truncated(_) => status::INVALID,
        }
    }
}
