use crate::{le, SerdeErr};

pub trait ByteWrite {
    fn write_byte(&mut self, byte: u8);

    fn write_bytes(&mut self, bytes: &[u8]) {
        for byte in bytes {
            self.write_byte(*byte);
        }
    }

    fn write_u16(&mut self, value: u16) {
        self.write_bytes(&le::encode_u16(value));
    }

    fn write_u32(&mut self, value: u32) {
        self.write_bytes(&le::encode_u32(value));
    }

    fn write_u64(&mut self, value: u64) {
        self.write_bytes(&le::encode_u64(value));
    }

    fn bytes_written(&self) -> usize;
}

/// A ByteWrite implementation over a caller-owned, fixed-size buffer.
/// Bytes past the end of the buffer are dropped and the overflow is
/// reported by [`SliceWriter::finish`]; callers are expected to size the
/// buffer up front so this never happens.
pub struct SliceWriter<'a> {
    buffer: &'a mut [u8],
    position: usize,
    attempted: usize,
}

impl<'a> SliceWriter<'a> {
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self {
            buffer,
            position: 0,
            attempted: 0,
        }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    pub fn overflowed(&self) -> bool {
        self.attempted > self.buffer.len()
    }

    /// Returns the number of bytes written, or an error if any write fell
    /// outside the buffer.
    pub fn finish(self) -> Result<usize, SerdeErr> {
        if self.overflowed() {
            return Err(SerdeErr::Overflow {
                attempted: self.attempted,
                capacity: self.buffer.len(),
            });
        }
        Ok(self.position)
    }
}

impl ByteWrite for SliceWriter<'_> {
    fn write_byte(&mut self, byte: u8) {
        self.attempted += 1;
        if self.position < self.buffer.len() {
            self.buffer[self.position] = byte;
            self.position += 1;
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) {
        let fits = bytes.len().min(self.remaining());
        self.buffer[self.position..self.position + fits].copy_from_slice(&bytes[..fits]);
        self.position += fits;
        self.attempted += bytes.len();
    }

    fn bytes_written(&self) -> usize {
        self.position
    }
}
