//! Byte-level little-endian encode/decode.
//!
//! These helpers never transmute or reinterpret memory: each byte is produced
//! by shifting and masking, and each value is rebuilt by shifting bytes back
//! into place. The packed view and the delta codec use nothing else.

#[inline]
pub fn encode_u16(value: u16) -> [u8; 2] {
    [(value & 0xFF) as u8, ((value >> 8) & 0xFF) as u8]
}

#[inline]
pub fn encode_u32(value: u32) -> [u8; 4] {
    [
        (value & 0xFF) as u8,
        ((value >> 8) & 0xFF) as u8,
        ((value >> 16) & 0xFF) as u8,
        ((value >> 24) & 0xFF) as u8,
    ]
}

#[inline]
pub fn encode_u64(value: u64) -> [u8; 8] {
    let mut out = [0u8; 8];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = ((value >> (i * 8)) & 0xFF) as u8;
    }
    out
}

#[inline]
pub fn decode_u16(bytes: [u8; 2]) -> u16 {
    u16::from(bytes[0]) | (u16::from(bytes[1]) << 8)
}

#[inline]
pub fn decode_u32(bytes: [u8; 4]) -> u32 {
    u32::from(bytes[0])
        | (u32::from(bytes[1]) << 8)
        | (u32::from(bytes[2]) << 16)
        | (u32::from(bytes[3]) << 24)
}

#[inline]
pub fn decode_u64(bytes: [u8; 8]) -> u64 {
    let mut value: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        value |= u64::from(*byte) << (i * 8);
    }
    value
}

/// Writes the low `width` bytes of `value` into `out` in little-endian order.
/// `width` must be 1, 2, 4 or 8 and `out.len()` must equal `width`.
#[inline]
pub fn encode_width(value: u64, out: &mut [u8]) {
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = ((value >> (i * 8)) & 0xFF) as u8;
    }
}

/// Reads `bytes.len()` little-endian bytes into the low bits of a `u64`.
#[inline]
pub fn decode_width(bytes: &[u8]) -> u64 {
    let mut value: u64 = 0;
    for (i, byte) in bytes.iter().enumerate() {
        value |= u64::from(*byte) << (i * 8);
    }
    value
}
