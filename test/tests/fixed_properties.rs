/// PROPERTY-BASED TESTS: Fixed-point arithmetic
///
/// Key invariants:
/// 1. Every operation saturates instead of wrapping
/// 2. Results equal the exact wide-integer result, clamped
/// 3. Widening conversions are lossless

use proptest::prelude::*;

use lockstep_shared::{
    fixed::{q16_16_from_q32_32, q16_16_from_q48_16, q4_12_from_q16_16},
    ByteReader, ByteSerde, StreamWriter, Q16_16, Q24_8, Q32_32, Q48_16, Q4_12,
};

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

proptest! {
    #[test]
    fn prop_add_sub_clamp(a in any::<i32>(), b in any::<i32>()) {
        let (qa, qb) = (Q16_16::from_raw(a), Q16_16::from_raw(b));
        prop_assert_eq!((qa + qb).raw(), clamp_i32(i64::from(a) + i64::from(b)));
        prop_assert_eq!((qa - qb).raw(), clamp_i32(i64::from(a) - i64::from(b)));
    }

    #[test]
    fn prop_mul_matches_wide_product(a in any::<i32>(), b in any::<i32>()) {
        let expected = clamp_i32((i64::from(a) * i64::from(b)) >> 16);
        prop_assert_eq!((Q16_16::from_raw(a) * Q16_16::from_raw(b)).raw(), expected);
    }

    #[test]
    fn prop_div_matches_wide_quotient(a in any::<i32>(), b in any::<i32>()) {
        prop_assume!(b != 0);
        let expected = clamp_i32((i64::from(a) << 16) / i64::from(b));
        prop_assert_eq!((Q16_16::from_raw(a) / Q16_16::from_raw(b)).raw(), expected);
    }

    #[test]
    fn prop_from_int_saturates(value in any::<i64>()) {
        let q = Q16_16::from_int(value);
        let expected = value.clamp(-32768, 32767);
        prop_assert_eq!(q.to_int(), expected);
        prop_assert_eq!(Q16_16::checked_from_int(value).is_ok(), value == expected);
    }

    #[test]
    fn prop_widening_round_trips(raw in any::<i32>()) {
        let q = Q16_16::from_raw(raw);
        prop_assert_eq!(q16_16_from_q48_16(Q48_16::from(q)), q);
        prop_assert_eq!(q16_16_from_q32_32(Q32_32::from(q)), q);
    }

    #[test]
    fn prop_narrowing_stays_in_range(raw in any::<i32>()) {
        let narrowed = q4_12_from_q16_16(Q16_16::from_raw(raw));
        let expected = (i64::from(raw) >> 4).clamp(i64::from(i16::MIN), i64::from(i16::MAX));
        prop_assert_eq!(i64::from(narrowed.raw()), expected);
    }

    #[test]
    fn prop_lerp_endpoints(a in any::<i32>(), b in any::<i32>()) {
        let (qa, qb) = (Q16_16::from_raw(a), Q16_16::from_raw(b));
        prop_assert_eq!(Q16_16::lerp(qa, qb, Q16_16::ZERO), qa);
        prop_assert_eq!(Q16_16::lerp(qa, qb, Q16_16::ONE), qb);
    }

    #[test]
    fn prop_serde_is_little_endian(raw in any::<i64>()) {
        let value = Q32_32::from_raw(raw);
        let mut writer = StreamWriter::new();
        value.ser(&mut writer);
        let bytes = writer.to_bytes();
        prop_assert_eq!(&bytes[..], &raw.to_le_bytes()[..]);
        prop_assert_eq!(Q32_32::de(&mut ByteReader::new(&bytes)), Ok(value));
    }
}

#[test]
fn q4_12_extremes() {
    assert_eq!(Q4_12::from_int(8), Q4_12::MAX);
    assert_eq!(Q4_12::from_int(-8).to_int(), -8);
    assert_eq!(Q4_12::MAX + Q4_12::ONE, Q4_12::MAX);
    assert_eq!(-Q4_12::MIN, Q4_12::MAX);
    assert_eq!(Q4_12::MIN.saturating_abs(), Q4_12::MAX);
}

#[test]
fn to_int_floors_negative_values() {
    assert_eq!(Q16_16::from_raw(-1).to_int(), -1);
    assert_eq!(Q24_8::from_raw(-128).to_int(), -1);
    assert_eq!(Q24_8::from_raw(128).to_int(), 0);
}
