//! Integer/float conversions.
//!
//! Both directions normalize with a leading-one count and round to nearest, ties to
//! even. Every `i32` converts; magnitudes above 2^24 are rounded.

use super::bits::{BIAS, Fp32, pack, round_shift};

/// Converts a signed integer to the nearest pattern.
pub const fn itof(value: i32) -> Fp32 {
    if value == 0 {
        return Fp32::ZERO;
    }
    let sign = (value < 0) as u32;
    let mag = value.unsigned_abs();
    let msb = 31 - mag.leading_zeros();
    let sig = if msb <= 23 {
        (mag as u128) << (23 - msb)
    } else {
        round_shift(mag as u128, msb - 23)
    };
    pack(sign, msb as i32 + BIAS, sig)
}

/// Converts a pattern to the nearest signed integer.
///
/// Magnitudes below one half give zero and values outside the `i32` range saturate.
pub const fn ftoi(value: Fp32) -> i32 {
    if value.is_zero() {
        return 0;
    }
    let negative = value.sign() != 0;
    let e = value.exponent() as i32 - BIAS;
    if e < -1 {
        return 0;
    }
    if e >= 31 {
        return if negative { i32::MIN } else { i32::MAX };
    }

    let sig = value.significand() as u128;
    let mag = if e >= 23 {
        sig << (e - 23)
    } else {
        round_shift(sig, (23 - e) as u32)
    };

    if negative {
        (-(mag as i64)) as i32
    } else if mag > i32::MAX as u128 {
        i32::MAX
    } else {
        mag as i32
    }
}
