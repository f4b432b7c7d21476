//! Cross-format conversions.
//!
//! Widening conversions add fractional bits with a left shift and are
//! lossless, so they are also exposed through `From`. Narrowing conversions
//! drop fractional bits with an arithmetic right shift and saturate when the
//! integer part does not fit the target.

use super::{Q16_16, Q24_8, Q32_32, Q48_16, Q4_12};

impl From<Q4_12> for Q16_16 {
    fn from(value: Q4_12) -> Self {
        Q16_16::from_raw(i32::from(value.raw()) << 4)
    }
}

impl From<Q4_12> for Q32_32 {
    fn from(value: Q4_12) -> Self {
        Q32_32::from_raw(i64::from(value.raw()) << 20)
    }
}

impl From<Q16_16> for Q48_16 {
    fn from(value: Q16_16) -> Self {
        Q48_16::from_raw(i64::from(value.raw()))
    }
}

impl From<Q16_16> for Q32_32 {
    fn from(value: Q16_16) -> Self {
        Q32_32::from_raw(i64::from(value.raw()) << 16)
    }
}

impl From<Q24_8> for Q48_16 {
    fn from(value: Q24_8) -> Self {
        Q48_16::from_raw(i64::from(value.raw()) << 8)
    }
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub fn q16_16_from_q4_12(value: Q4_12) -> Q16_16 {
    value.into()
}

pub fn q4_12_from_q16_16(value: Q16_16) -> Q4_12 {
    let shifted = value.raw() >> 4;
    Q4_12::from_raw(shifted.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16)
}

pub fn q24_8_from_q16_16(value: Q16_16) -> Q24_8 {
    Q24_8::from_raw(value.raw() >> 8)
}

pub fn q16_16_from_q24_8(value: Q24_8) -> Q16_16 {
    Q16_16::from_raw(clamp_i32(i64::from(value.raw()) << 8))
}

pub fn q48_16_from_q16_16(value: Q16_16) -> Q48_16 {
    value.into()
}

pub fn q16_16_from_q48_16(value: Q48_16) -> Q16_16 {
    Q16_16::from_raw(clamp_i32(value.raw()))
}

pub fn q32_32_from_q16_16(value: Q16_16) -> Q32_32 {
    value.into()
}

pub fn q16_16_from_q32_32(value: Q32_32) -> Q16_16 {
    Q16_16::from_raw(clamp_i32(value.raw() >> 16))
}

pub fn q32_32_from_q48_16(value: Q48_16) -> Q32_32 {
    let widened = i128::from(value.raw()) << 16;
    Q32_32::from_raw(widened.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64)
}

pub fn q48_16_from_q32_32(value: Q32_32) -> Q48_16 {
    Q48_16::from_raw(value.raw() >> 16)
}
