use thiserror::Error;

use crate::status;

use super::ElementType;

/// Errors that can occur while configuring or rebuilding a packed view
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PackedError {
    /// Field descriptors are not in ascending (component_id, field_id) order
    #[error("Fields must be sorted by (component_id, field_id): field {index} ({component_id}, {field_id}) is out of order")]
    UnsortedFields {
        index: usize,
        component_id: u32,
        field_id: u32,
    },

    /// Declared element size is not a legal packed width
    #[error("Field {index} declares unsupported element size {element_size} (must be 1, 2, 4 or 8)")]
    UnsupportedElementSize { index: usize, element_size: u8 },

    /// Declared element size disagrees with the element type
    #[error("Field {index} declares element size {element_size} but {element_type:?} is {expected} bytes")]
    ElementSizeMismatch {
        index: usize,
        element_type: ElementType,
        element_size: u8,
        expected: u8,
    },

    /// Quantization would clear every bit of the element
    #[error("Field {index} quantizes {quant_bits} bits of a {element_bits}-bit element")]
    InvalidQuantization {
        index: usize,
        quant_bits: u8,
        element_bits: u32,
    },

    /// stride * entity_count does not fit in memory
    #[error("View of {entity_count} entities with stride {stride} overflows the addressable size")]
    ByteCountOverflow { entity_count: u32, stride: usize },

    /// Caller storage is smaller than the packed byte count
    #[error("View storage holds {provided} bytes but {required} are required")]
    StorageTooSmall { required: usize, provided: usize },

    /// One source per field is required
    #[error("Expected {expected} field sources, got {provided}")]
    SourceCountMismatch { expected: usize, provided: usize },

    /// Source stride cannot step over a whole element
    #[error("Source {index} stride {stride} is smaller than its element size {element_size}")]
    SourceStrideTooSmall {
        index: usize,
        stride: usize,
        element_size: usize,
    },

    /// Source holds fewer elements than the view needs
    #[error("Source {index} holds {available} elements but {required} are required")]
    SourceTooShort {
        index: usize,
        available: usize,
        required: usize,
    },

    /// A view with no fields cannot pack entities
    #[error("Cannot pack {entity_count} entities with a zero row stride")]
    ZeroStride { entity_count: u32 },

    /// A step was requested with no entity budget
    #[error("rebuild_step requires a non-zero entity budget")]
    ZeroStepBudget,

    /// Output rows buffer is not a whole number of rows
    #[error("Row buffer of {len} bytes is not a multiple of the row stride {stride}")]
    RowBufferMisaligned { len: usize, stride: usize },

    /// Entity index past the end of the view
    #[error("Entity {entity} is out of range (view has {entity_count})")]
    EntityOutOfRange { entity: u32, entity_count: u32 },

    /// Field index past the end of the descriptor list
    #[error("Field {field} is out of range (view has {field_count})")]
    FieldOutOfRange { field: usize, field_count: usize },
}

impl PackedError {
    pub fn code(&self) -> i32 {
        match self {
            PackedError::UnsupportedElementSize { .. } => status::UNSUPPORTED,
            PackedError::StorageTooSmall { .. } => status::INSUFFICIENT_CAPACITY,
            PackedError::UnsortedFields { .. }
            | PackedError::ElementSizeMismatch { .. }
            | PackedError::InvalidQuantization { .. }
            | PackedError::ByteCountOverflow { .. }
            | PackedError::SourceCountMismatch { .. }
            | PackedError::SourceStrideTooSmall { .. }
            | PackedError::SourceTooShort { .. }
            | PackedError::ZeroStride { .. }
            | PackedError::ZeroStepBudget
            | PackedError::RowBufferMisaligned { .. }
            | PackedError::EntityOutOfRange { .. }
            | PackedError::FieldOutOfRange { .. } => status::INVALID,
        }
    }
}
