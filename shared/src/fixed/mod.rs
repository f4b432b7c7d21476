//! # Fixed-point scalars
//!
//! Signed Q-format numbers backed by plain integers. All arithmetic is
//! integer-only and saturating: overflow clamps to the format's range instead
//! of wrapping, and division by zero yields `MAX` or `MIN` depending on the
//! sign of the numerator. Multiplication and division go through an integer
//! twice as wide as the storage type before rescaling.
//!
//! `from_f64` / `to_f64` exist for tooling and debug output only. Nothing that
//! feeds the packed view or the delta codec may call them.

use std::ops::{Add, Div, Mul, Neg, Sub};

use lockstep_serde::{ByteReader, ByteSerde, ByteWrite, ConstByteLength, SerdeErr};

mod conversions;
pub mod error;

pub use conversions::{
    q16_16_from_q24_8, q16_16_from_q32_32, q16_16_from_q48_16, q16_16_from_q4_12,
    q24_8_from_q16_16, q32_32_from_q16_16, q32_32_from_q48_16, q48_16_from_q16_16,
    q48_16_from_q32_32, q4_12_from_q16_16,
};
pub use error::FixedError;

/// Common surface of every Q format, used where code is generic over the
/// format (column helpers, packing).
pub trait FixedPoint: Copy {
    const FRAC_BITS: u32;
    /// Storage width in bytes
    const BYTES: usize;

    /// The raw integer, sign-extended to 64 bits.
    fn raw_i64(self) -> i64;
}

macro_rules! fixed_point {
    ($(#[$meta:meta])* $name:ident, $repr:ty, $wide:ty, $frac:expr, $label:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name($repr);

        impl $name {
            pub const FRAC_BITS: u32 = $frac;
            pub const ZERO: Self = Self(0);
            pub const ONE: Self = Self(1 << $frac);
            pub const MIN: Self = Self(<$repr>::MIN);
            pub const MAX: Self = Self(<$repr>::MAX);

            pub const fn from_raw(raw: $repr) -> Self {
                Self(raw)
            }

            pub const fn raw(self) -> $repr {
                self.0
            }

            fn saturate(wide: $wide) -> Self {
                if wide > <$wide>::from(<$repr>::MAX) {
                    Self::MAX
                } else if wide < <$wide>::from(<$repr>::MIN) {
                    Self::MIN
                } else {
                    Self(wide as $repr)
                }
            }

            fn saturate_i128(wide: i128) -> Self {
                if wide > i128::from(<$repr>::MAX) {
                    Self::MAX
                } else if wide < i128::from(<$repr>::MIN) {
                    Self::MIN
                } else {
                    Self(wide as $repr)
                }
            }

            /// Converts an integer, saturating when its magnitude exceeds the
            /// integer part of the format.
            pub fn from_int(value: i64) -> Self {
                Self::saturate_i128(i128::from(value) << $frac)
            }

            /// Converts an integer, failing instead of saturating.
            pub fn checked_from_int(value: i64) -> Result<Self, FixedError> {
                let min = i64::from(<$repr>::MIN >> $frac);
                let max = i64::from(<$repr>::MAX >> $frac);
                if value < min || value > max {
                    return Err(FixedError::OutOfRange {
                        format: $label,
                        value,
                        min,
                        max,
                    });
                }
                Ok(Self::from_int(value))
            }

            /// Integer part, rounded toward negative infinity.
            pub fn to_int(self) -> i64 {
                i64::from(self.0 >> $frac)
            }

            /// Tooling only. NaN maps to zero, out-of-range values saturate.
            pub fn from_f64(value: f64) -> Self {
                let scaled = (value * ((1u64 << $frac) as f64)).round();
                if scaled.is_nan() {
                    return Self::ZERO;
                }
                Self::saturate_i128(scaled as i128)
            }

            /// Tooling only.
            pub fn to_f64(self) -> f64 {
                self.0 as f64 / ((1u64 << $frac) as f64)
            }

            pub fn saturating_add(self, rhs: Self) -> Self {
                Self(self.0.saturating_add(rhs.0))
            }

            pub fn saturating_sub(self, rhs: Self) -> Self {
                Self(self.0.saturating_sub(rhs.0))
            }

            pub fn saturating_mul(self, rhs: Self) -> Self {
                let product = <$wide>::from(self.0) * <$wide>::from(rhs.0);
                Self::saturate(product >> $frac)
            }

            pub fn saturating_div(self, rhs: Self) -> Self {
                if rhs.0 == 0 {
                    return if self.0 >= 0 { Self::MAX } else { Self::MIN };
                }
                let numerator = <$wide>::from(self.0) << $frac;
                Self::saturate(numerator / <$wide>::from(rhs.0))
            }

            pub fn saturating_neg(self) -> Self {
                Self(self.0.saturating_neg())
            }

            pub fn saturating_abs(self) -> Self {
                Self(self.0.saturating_abs())
            }

            /// `a + (b - a) * t`, computed in the wide intermediate and
            /// saturated once at the end.
            pub fn lerp(a: Self, b: Self, t: Self) -> Self {
                let span = <$wide>::from(b.0) - <$wide>::from(a.0);
                let step = span.saturating_mul(<$wide>::from(t.0)) >> $frac;
                Self::saturate(<$wide>::from(a.0).saturating_add(step))
            }
        }

        impl FixedPoint for $name {
            const FRAC_BITS: u32 = $frac;
            const BYTES: usize = std::mem::size_of::<$repr>();

            fn raw_i64(self) -> i64 {
                i64::from(self.0)
            }
        }

        impl Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self {
                self.saturating_add(rhs)
            }
        }

        impl Sub for $name {
            type Output = Self;

            fn sub(self, rhs: Self) -> Self {
                self.saturating_sub(rhs)
            }
        }

        impl Mul for $name {
            type Output = Self;

            fn mul(self, rhs: Self) -> Self {
                self.saturating_mul(rhs)
            }
        }

        impl Div for $name {
            type Output = Self;

            fn div(self, rhs: Self) -> Self {
                self.saturating_div(rhs)
            }
        }

        impl Neg for $name {
            type Output = Self;

            fn neg(self) -> Self {
                self.saturating_neg()
            }
        }

        impl ByteSerde for $name {
            fn ser(&self, writer: &mut dyn ByteWrite) {
                self.0.ser(writer);
            }

            fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
                Ok(Self(<$repr>::de(reader)?))
            }

            fn byte_length(&self) -> usize {
                std::mem::size_of::<$repr>()
            }
        }

        impl ConstByteLength for $name {
            fn const_byte_length() -> usize {
                std::mem::size_of::<$repr>()
            }
        }
    };
}

fixed_point!(
    /// Q4.12 in an `i16`: range about [-8, 8), resolution 1/4096.
    Q4_12, i16, i32, 12, "Q4.12"
);
fixed_point!(
    /// Q16.16 in an `i32`: the default gameplay scalar.
    Q16_16, i32, i64, 16, "Q16.16"
);
fixed_point!(
    /// Q24.8 in an `i32`: coarse, wide-range positions.
    Q24_8, i32, i64, 8, "Q24.8"
);
fixed_point!(
    /// Q48.16 in an `i64`: accumulators that must not saturate early.
    Q48_16, i64, i128, 16, "Q48.16"
);
fixed_point!(
    /// Q32.32 in an `i64`: high-precision intermediate values.
    Q32_32, i64, i128, 32, "Q32.32"
);
