use log::warn;

use lockstep_serde::{ByteReader, ByteSerde};

use super::{ChunkEntry, TlvError, FORMAT_VERSION, HEADER_SIZE, MAGIC};

/// A parsed, bounds-checked view of a container.
#[derive(Debug)]
pub struct ContainerReader<'a> {
    bytes: &'a [u8],
    entries: Vec<ChunkEntry>,
}

impl<'a> ContainerReader<'a> {
    /// Validates the header and directory. Chunk payloads are only
    /// checksummed when they are fetched.
    pub fn parse(bytes: &'a [u8]) -> Result<Self, TlvError> {
        let mut reader = ByteReader::new(bytes);
        let magic = <[u8; 4]>::de(&mut reader)?;
        if magic != MAGIC {
            return Err(TlvError::BadMagic { found: magic });
        }
        let version = reader.read_u16()?;
        if version != FORMAT_VERSION {
            return Err(TlvError::UnsupportedVersion { version });
        }
        let header_size = reader.read_u16()?;
        if header_size < HEADER_SIZE || usize::from(header_size) > bytes.len() {
            return Err(TlvError::BadHeaderSize {
                header_size,
                len: bytes.len(),
            });
        }
        let chunk_count = reader.read_u32()?;
        let directory_offset = reader.read_u32()?;

        let directory_fits = (chunk_count as usize)
            .checked_mul(ChunkEntry::SIZE)
            .and_then(|len| len.checked_add(directory_offset as usize))
            .is_some_and(|end| end <= bytes.len());
        if !directory_fits || (directory_offset as usize) < usize::from(header_size) {
            return Err(TlvError::DirectoryOutOfBounds {
                chunk_count,
                directory_offset,
                len: bytes.len(),
            });
        }

        let mut reader = ByteReader::new(&bytes[directory_offset as usize..]);
        let mut entries = Vec::with_capacity(chunk_count as usize);
        for index in 0..chunk_count as usize {
            let entry = ChunkEntry::de(&mut reader)?;
            let in_bounds = entry.offset >= u64::from(header_size)
                && entry
                    .offset
                    .checked_add(entry.size)
                    .is_some_and(|end| end <= u64::from(directory_offset));
            if !in_bounds {
                return Err(TlvError::ChunkOutOfBounds {
                    index,
                    offset: entry.offset,
                    size: entry.size,
                });
            }
            entries.push(entry);
        }

        Ok(Self { bytes, entries })
    }

    pub fn entries(&self) -> &[ChunkEntry] {
        &self.entries
    }

    /// Payload of the first chunk with `type_id`, after a CRC-32 check.
    pub fn chunk(&self, type_id: u32) -> Result<&'a [u8], TlvError> {
        let entry = self
            .entries
            .iter()
            .find(|entry| entry.type_id == type_id)
            .ok_or(TlvError::ChunkNotFound { type_id })?;
        self.payload(entry)
    }

    /// Payload of the chunk at directory position `index`, after a CRC-32 check.
    pub fn chunk_at(&self, index: usize) -> Option<Result<&'a [u8], TlvError>> {
        self.entries.get(index).map(|entry| self.payload(entry))
    }

    fn payload(&self, entry: &ChunkEntry) -> Result<&'a [u8], TlvError> {
        // bounds were checked in `parse`
        let start = entry.offset as usize;
        let payload = &self.bytes[start..start + entry.size as usize];
        let actual = crc32fast::hash(payload);
        if actual != entry.crc32 {
            warn!(
                "Chunk {} failed CRC check: expected {:#010x}, got {:#010x}",
                entry.type_id, entry.crc32, actual
            );
            return Err(TlvError::CrcMismatch {
                type_id: entry.type_id,
                expected: entry.crc32,
                actual,
            });
        }
        Ok(payload)
    }
}
