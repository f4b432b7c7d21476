//! # Chunk container
//!
//! A small tag-length-value file format for persisting codec output.
//! Layout, all little-endian:
//!
//! ```text
//! "DTLV" | u16 version | u16 header_size | u32 chunk_count | u32 directory_offset
//! chunk payloads ...
//! directory: chunk_count x { u32 type_id, u16 version, u16 flags, u64 offset, u64 size, u32 crc32 }
//! ```

mod entry;
mod error;
mod reader;
mod writer;

pub use entry::ChunkEntry;
pub use error::TlvError;
pub use reader::ContainerReader;
pub use writer::ContainerWriter;

pub const MAGIC: [u8; 4] = *b"DTLV";
pub const FORMAT_VERSION: u16 = 1;
pub const HEADER_SIZE: u16 = 16;

const CHUNK_COUNT_OFFSET: usize = 8;
const DIRECTORY_OFFSET_OFFSET: usize = 12;
