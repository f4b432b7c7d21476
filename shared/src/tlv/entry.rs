use lockstep_serde::{ByteReader, ByteSerde, ByteWrite, ConstByteLength, SerdeErr};

/// One directory record describing a chunk payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkEntry {
    pub type_id: u32,
    pub version: u16,
    pub flags: u16,
    /// Absolute offset of the payload from the start of the container
    pub offset: u64,
    pub size: u64,
    pub crc32: u32,
}

impl ChunkEntry {
    pub const SIZE: usize = 28;
}

impl ByteSerde for ChunkEntry {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_u32(self.type_id);
        writer.write_u16(self.version);
        writer.write_u16(self.flags);
        writer.write_u64(self.offset);
        writer.write_u64(self.size);
        writer.write_u32(self.crc32);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            type_id: reader.read_u32()?,
            version: reader.read_u16()?,
            flags: reader.read_u16()?,
            offset: reader.read_u64()?,
            size: reader.read_u64()?,
            crc32: reader.read_u32()?,
        })
    }

    fn byte_length(&self) -> usize {
        Self::SIZE
    }
}

impl ConstByteLength for ChunkEntry {
    fn const_byte_length() -> usize {
        Self::SIZE
    }
}
