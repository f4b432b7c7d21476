use lockstep_serde::{ByteReader, ByteSerde, ByteWrite, ConstByteLength, SerdeErr};

use super::DeltaError;

/// Fixed-size delta header: `view_id`, `baseline_id`, `entity_count` and
/// `stride`, little-endian, in that order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeltaHeader {
    pub view_id: u64,
    pub baseline_id: u64,
    pub entity_count: u32,
    pub stride: u32,
}

impl DeltaHeader {
    pub const SIZE: usize = 24;

    /// Parses the header at the front of `bytes`.
    pub fn read(bytes: &[u8]) -> Result<Self, DeltaError> {
        let mut reader = ByteReader::new(bytes);
        Ok(Self::de(&mut reader)?)
    }

    pub fn bitmask_bytes(&self) -> usize {
        bitmask_bytes(self.entity_count)
    }

    /// Row bytes described by this header.
    pub fn row_bytes(&self) -> Option<usize> {
        (self.entity_count as usize).checked_mul(self.stride as usize)
    }
}

impl ByteSerde for DeltaHeader {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_u64(self.view_id);
        writer.write_u64(self.baseline_id);
        writer.write_u32(self.entity_count);
        writer.write_u32(self.stride);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self {
            view_id: reader.read_u64()?,
            baseline_id: reader.read_u64()?,
            entity_count: reader.read_u32()?,
            stride: reader.read_u32()?,
        })
    }

    fn byte_length(&self) -> usize {
        Self::SIZE
    }
}

impl ConstByteLength for DeltaHeader {
    fn const_byte_length() -> usize {
        Self::SIZE
    }
}

/// Summary of an encoded delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeltaInfo {
    pub view_id: u64,
    pub baseline_id: u64,
    pub entity_count: u32,
    pub stride: usize,
    pub changed_count: u32,
    pub bitmask_bytes: usize,
    pub payload_bytes: usize,
    pub total_bytes: usize,
}

impl DeltaInfo {
    /// True when the two views were byte-identical.
    pub fn is_empty(&self) -> bool {
        self.changed_count == 0
    }
}

pub(crate) fn bitmask_bytes(entity_count: u32) -> usize {
    (entity_count as usize).div_ceil(8)
}
