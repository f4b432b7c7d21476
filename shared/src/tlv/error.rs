use thiserror::Error;

use lockstep_serde::SerdeErr;

use crate::status;

/// Errors that can occur while writing or reading a chunk container
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TlvError {
    #[error("begin_chunk called while chunk {open_type_id} is still open")]
    ChunkAlreadyOpen { open_type_id: u32 },

    #[error("No chunk is open")]
    NoOpenChunk,

    #[error("Container exceeds the 32-bit directory offset: {size} bytes")]
    TooLarge { size: usize },

    #[error("Bad container magic {found:?}")]
    BadMagic { found: [u8; 4] },

    #[error("Unsupported container version {version}")]
    UnsupportedVersion { version: u16 },

    #[error("Header size {header_size} is invalid for a {len}-byte container")]
    BadHeaderSize { header_size: u16, len: usize },

    #[error("Directory of {chunk_count} entries at offset {directory_offset} does not fit in {len} bytes")]
    DirectoryOutOfBounds {
        chunk_count: u32,
        directory_offset: u32,
        len: usize,
    },

    #[error("Chunk {index} spans {offset}..{offset}+{size}, outside the payload area")]
    ChunkOutOfBounds { index: usize, offset: u64, size: u64 },

    #[error("No chunk with type id {type_id}")]
    ChunkNotFound { type_id: u32 },

    #[error("Chunk {type_id} CRC mismatch: directory says {expected:#010x}, payload hashes to {actual:#010x}")]
    CrcMismatch {
        type_id: u32,
        expected: u32,
        actual: u32,
    },

    #[error("Truncated container: {0}")]
    Truncated(#[from] SerdeErr),
}

impl TlvError {
    pub fn code(&self) -> i32 {
        match self {
            TlvError::UnsupportedVersion { .. } => status::UNSUPPORTED,
            TlvError::TooLarge { .. } => status::INSUFFICIENT_CAPACITY,
            _ => status::INVALID,
        }
    }
}
