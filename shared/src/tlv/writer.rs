use crc32fast::Hasher;
use log::debug;

use lockstep_serde::{ByteSerde, ByteWrite, StreamWriter};

use super::{
    ChunkEntry, TlvError, CHUNK_COUNT_OFFSET, DIRECTORY_OFFSET_OFFSET, FORMAT_VERSION,
    HEADER_SIZE, MAGIC,
};

struct OpenChunk {
    type_id: u32,
    version: u16,
    flags: u16,
    offset: usize,
    hasher: Hasher,
}

/// Builds a container in memory: header, chunk payloads, then directory.
pub struct ContainerWriter {
    stream: StreamWriter,
    entries: Vec<ChunkEntry>,
    open: Option<OpenChunk>,
}

impl ContainerWriter {
    pub fn new() -> Self {
        let mut stream = StreamWriter::new();
        stream.write_bytes(&MAGIC);
        stream.write_u16(FORMAT_VERSION);
        stream.write_u16(HEADER_SIZE);
        // chunk count and directory offset are patched by `finish`
        stream.write_u32(0);
        stream.write_u32(0);
        Self {
            stream,
            entries: Vec::new(),
            open: None,
        }
    }

    pub fn chunk_count(&self) -> usize {
        self.entries.len()
    }

    pub fn begin_chunk(&mut self, type_id: u32, version: u16, flags: u16) -> Result<(), TlvError> {
        if let Some(open) = &self.open {
            return Err(TlvError::ChunkAlreadyOpen {
                open_type_id: open.type_id,
            });
        }
        self.open = Some(OpenChunk {
            type_id,
            version,
            flags,
            offset: self.stream.bytes_written(),
            hasher: Hasher::new(),
        });
        Ok(())
    }

    pub fn append(&mut self, bytes: &[u8]) -> Result<(), TlvError> {
        let open = self.open.as_mut().ok_or(TlvError::NoOpenChunk)?;
        open.hasher.update(bytes);
        self.stream.write_bytes(bytes);
        Ok(())
    }

    pub fn end_chunk(&mut self) -> Result<ChunkEntry, TlvError> {
        let open = self.open.take().ok_or(TlvError::NoOpenChunk)?;
        let size = self.stream.bytes_written() - open.offset;
        let entry = ChunkEntry {
            type_id: open.type_id,
            version: open.version,
            flags: open.flags,
            offset: open.offset as u64,
            size: size as u64,
            crc32: open.hasher.finalize(),
        };
        self.entries.push(entry);
        Ok(entry)
    }

    /// Convenience for a chunk written in one piece.
    pub fn write_chunk(
        &mut self,
        type_id: u32,
        version: u16,
        flags: u16,
        payload: &[u8],
    ) -> Result<ChunkEntry, TlvError> {
        self.begin_chunk(type_id, version, flags)?;
        self.append(payload)?;
        self.end_chunk()
    }

    /// Writes the directory and returns the finished container.
    pub fn finish(mut self) -> Result<Vec<u8>, TlvError> {
        if let Some(open) = &self.open {
            return Err(TlvError::ChunkAlreadyOpen {
                open_type_id: open.type_id,
            });
        }
        let directory_offset = self.stream.bytes_written();
        let too_large = TlvError::TooLarge {
            size: directory_offset,
        };
        let directory_offset = u32::try_from(directory_offset).map_err(|_| too_large.clone())?;
        let chunk_count = u32::try_from(self.entries.len()).map_err(|_| too_large)?;

        for entry in &self.entries {
            entry.ser(&mut self.stream);
        }
        self.stream.patch_u32(CHUNK_COUNT_OFFSET, chunk_count);
        self.stream.patch_u32(DIRECTORY_OFFSET_OFFSET, directory_offset);

        let bytes = self.stream.to_bytes();
        debug!(
            "Container finished: {} chunks, {} bytes",
            chunk_count,
            bytes.len()
        );
        Ok(bytes)
    }
}

impl Default for ContainerWriter {
    fn default() -> Self {
        Self::new()
    }
}
