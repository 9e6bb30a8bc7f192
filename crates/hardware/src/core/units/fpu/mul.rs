//! Floating-point multiplier.
//!
//! Each 24-bit significand is split into a 13-bit high half and an 11-bit low half.
//! Only the high×high and the two cross products are formed; the low×low product and
//! the bits shifted out of the cross products are dropped. A fixed increment of half
//! an output ULP is added before truncation. The result is within two ULPs of the
//! exactly rounded product.

use super::bits::{Fp32, MANT_MASK, MAX_EXP};

/// Width of the low half of a split significand.
const LOW_BITS: u32 = 11;

/// Bit mask for the low half.
const LOW_MASK: u32 = (1 << LOW_BITS) - 1;

/// Splits a significand into `(high, low)` halves.
const fn split(sig: u32) -> (u32, u32) {
    (sig >> LOW_BITS, sig & LOW_MASK)
}

/// Multiplies two patterns.
///
/// Products too small to be normal collapse to positive zero regardless of sign.
pub fn fmul(a: Fp32, b: Fp32) -> Fp32 {
    let sign = a.sign() ^ b.sign();
    if a.is_zero() || b.is_zero() {
        return Fp32::zero(sign);
    }

    let (ah, al) = split(a.significand());
    let (bh, bl) = split(b.significand());
    let hh = ah * bh;
    let hl = (ah * bl) >> LOW_BITS;
    let lh = (al * bh) >> LOW_BITS;
    // Significand product scaled by 2^-22, short by less than 3.
    let partial = hh + hl + lh;

    let mut exp = a.exponent() as i32 + b.exponent() as i32 - 127;
    let shift = if partial >= 1 << 25 {
        exp += 1;
        2
    } else {
        1
    };
    let mut sig = (partial + (1 << (shift - 1))) >> shift;
    if sig >= 1 << 24 {
        sig >>= 1;
        exp += 1;
    }
    let mant = sig & MANT_MASK;

    if exp <= 0 {
        Fp32::ZERO
    } else if exp > MAX_EXP {
        Fp32::infinity(sign)
    } else {
        Fp32::from_parts(sign, exp as u32, mant)
    }
}
