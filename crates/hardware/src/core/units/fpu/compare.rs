//! Comparisons and sign moves.
//!
//! These work on the bit pattern alone. Any pattern with a zero exponent counts as
//! zero, and the two zeros compare equal.

use super::bits::{Fp32, MAGNITUDE_MASK};

/// Position on a monotonic integer line, with both zeros at the origin.
const fn ordinal(x: Fp32) -> i64 {
    if x.is_zero() {
        return 0;
    }
    let mag = (x.bits() & MAGNITUDE_MASK) as i64;
    if x.sign() == 0 { mag } else { -mag }
}

/// `a == b`.
pub const fn feq(a: Fp32, b: Fp32) -> bool {
    ordinal(a) == ordinal(b)
}

/// `a < b`.
pub const fn flt(a: Fp32, b: Fp32) -> bool {
    ordinal(a) < ordinal(b)
}

/// Flips the sign bit.
pub const fn fneg(a: Fp32) -> Fp32 {
    a.neg()
}

/// Clears the sign bit.
pub const fn fabs(a: Fp32) -> Fp32 {
    a.abs()
}
