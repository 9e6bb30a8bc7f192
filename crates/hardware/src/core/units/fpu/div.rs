//! Floating-point divider.
//!
//! `a / b` is computed as `a * (1 / b)`:
//! 1. **Seed:** A 1024-entry table indexed by the top ten mantissa bits of `b` gives
//!    the reciprocal of the segment midpoint (about 11 correct bits).
//! 2. **Refinement:** Two Newton-Raphson steps `y' = y * (2 - m * y)` in 60-bit fixed
//!    point bring the reciprocal well past single precision.
//! 3. **Pre-shift:** Divisors near either end of the exponent range are scaled by 2^±64
//!    so the intermediate reciprocal stays representable; the final exponent undoes it.
//! 4. **Product:** The dividend significand times the reciprocal, rounded once.

use std::sync::OnceLock;

use super::bits::{BIAS, Fp32, MAX_EXP, pack, round_shift};

/// Index width of the reciprocal seed table.
const SEED_BITS: u32 = 10;

/// Entries in the reciprocal seed table.
const SEED_ENTRIES: usize = 1 << SEED_BITS;

/// Fraction bits of the refined reciprocal.
const RECIP_FRAC_BITS: u32 = 60;

/// Divisor exponents above this are shifted down before inversion.
const PRESHIFT_HIGH: u32 = 190;

/// Divisor exponents below this are shifted up before inversion.
const PRESHIFT_LOW: u32 = 64;

/// Magnitude of the exponent pre-shift.
const PRESHIFT: u32 = 64;

static SEED: OnceLock<Vec<u32>> = OnceLock::new();

/// Reciprocal seeds in Q0.32: `2^32 / (1 + (i + 0.5) / 1024)`, rounded.
fn seed_table() -> &'static [u32] {
    SEED.get_or_init(|| {
        (0..SEED_ENTRIES as u64)
            .map(|i| {
                let denom = 2 * SEED_ENTRIES as u64 + 2 * i + 1;
                let num = 1u64 << (32 + SEED_BITS + 1);
                ((num + denom / 2) / denom) as u32
            })
            .collect()
    })
}

/// Reciprocal of a 24-bit significand `m` (read as `m / 2^23` in `[1, 2)`), in Q0.60.
pub fn reciprocal(sig: u32) -> u64 {
    let idx = ((sig >> (23 - SEED_BITS)) as usize) & (SEED_ENTRIES - 1);
    let m = u128::from(sig);
    let mut y = u128::from(seed_table()[idx]) << (RECIP_FRAC_BITS - 32);
    for _ in 0..2 {
        // m * y at scale 2^83; 2 - m*y rescaled to 2^56.
        let my = m * y;
        let t = ((1u128 << 84) - my) >> 27;
        y = (y * t) >> 56;
    }
    y as u64
}

/// Scales a biased divisor exponent into the safe inversion range.
///
/// Returns the adjusted exponent and the power of two that was removed.
const fn pre_shift(exp: u32) -> (u32, i32) {
    if exp > PRESHIFT_HIGH {
        (exp - PRESHIFT, PRESHIFT as i32)
    } else if exp < PRESHIFT_LOW {
        (exp + PRESHIFT, -(PRESHIFT as i32))
    } else {
        (exp, 0)
    }
}

/// Divides two patterns.
///
/// A zero divisor yields a signed infinity (outside the guaranteed domain).
pub fn fdiv(a: Fp32, b: Fp32) -> Fp32 {
    let sign = a.sign() ^ b.sign();
    if a.is_zero() {
        return Fp32::zero(sign);
    }
    if b.is_zero() {
        return Fp32::infinity(sign);
    }

    let (b_exp, shift) = pre_shift(b.exponent());
    // Biased exponent of 2^-(b_exp - 127).
    let inv_exp = MAX_EXP - b_exp as i32;
    let y = reciprocal(b.significand());

    // Quotient significand at scale 2^83; in (2^82, 2^84).
    let q = u128::from(a.significand()) * u128::from(y);
    let exp = a.exponent() as i32 + inv_exp - BIAS - shift;
    if q >= 1u128 << (RECIP_FRAC_BITS + 23) {
        pack(sign, exp, round_shift(q, RECIP_FRAC_BITS))
    } else {
        pack(sign, exp - 1, round_shift(q, RECIP_FRAC_BITS - 1))
    }
}
