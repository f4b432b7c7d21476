use crate::ByteWrite;

/// A ByteWrite implementation that grows as needed.
/// Unlike SliceWriter, which is bounded by a caller-owned buffer,
/// StreamWriter owns a Vec<u8> and never overflows.
pub struct StreamWriter {
    buffer: Vec<u8>,
}

impl StreamWriter {
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(4096), // Start with 4KB, will grow as needed
        }
    }

    pub fn to_bytes(self) -> Vec<u8> {
        self.buffer
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Overwrites 4 bytes at `offset` with `value` in little-endian order.
    /// Used to back-patch sizes and offsets once they are known.
    /// Returns false if the range is not inside what has been written.
    pub fn patch_u32(&mut self, offset: usize, value: u32) -> bool {
        let Some(slot) = self.buffer.get_mut(offset..offset + 4) else {
            return false;
        };
        slot.copy_from_slice(&crate::le::encode_u32(value));
        true
    }
}

impl Default for StreamWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteWrite for StreamWriter {
    fn write_byte(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    fn bytes_written(&self) -> usize {
        self.buffer.len()
    }
}
