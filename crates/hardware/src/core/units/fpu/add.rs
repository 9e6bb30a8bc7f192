//! Floating-point adder.
//!
//! Addition is split into three mutually exclusive paths chosen by comparing the
//! operands after ordering them by magnitude:
//! 1. **Special:** A zero operand, or exact cancellation (`x + -x`).
//! 2. **Close:** Effective subtraction with an exponent difference of at most one.
//!    Massive cancellation is possible, so the result is renormalized by a leading-zero
//!    count; at most one bit is ever rounded away.
//! 3. **Far:** Everything else. The smaller significand is aligned with a sticky bit,
//!    added or subtracted, and the sum needs at most a one-bit renormalization.
//!
//! Results are rounded to nearest, ties to even.

use super::bits::{Fp32, pack, round_shift};

/// Guard bits kept below the significand on the far path.
const FAR_GUARD_BITS: u32 = 29;

/// Bit position of the hidden bit after the far-path guard extension.
const FAR_HIDDEN_POS: u32 = 23 + FAR_GUARD_BITS;

/// Adder path for an ordered operand pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddPath {
    /// Zero operand or exact cancellation.
    Special,
    /// Effective subtraction, exponent difference ≤ 1.
    Close,
    /// All other operand pairs.
    Far,
}

/// Orders two operands so the first has the larger magnitude.
pub const fn order(a: Fp32, b: Fp32) -> (Fp32, Fp32) {
    if a.magnitude() >= b.magnitude() { (a, b) } else { (b, a) }
}

/// Selects the adder path for `big + small`, where `|big| >= |small|`.
pub const fn select_path(big: Fp32, small: Fp32) -> AddPath {
    let opposite = big.sign() != small.sign();
    if small.is_zero() || (opposite && big.magnitude() == small.magnitude()) {
        AddPath::Special
    } else if opposite && big.exponent() - small.exponent() <= 1 {
        AddPath::Close
    } else {
        AddPath::Far
    }
}

/// Adds two patterns.
pub fn fadd(a: Fp32, b: Fp32) -> Fp32 {
    let (big, small) = order(a, b);
    match select_path(big, small) {
        AddPath::Special => special(big, small),
        AddPath::Close => close(big, small),
        AddPath::Far => far(big, small),
    }
}

/// Subtracts `b` from `a` by adding `-b`.
pub fn fsub(a: Fp32, b: Fp32) -> Fp32 {
    fadd(a, b.neg())
}

const fn special(big: Fp32, small: Fp32) -> Fp32 {
    if !small.is_zero() {
        // x + -x
        Fp32::ZERO
    } else if big.is_zero() {
        Fp32::zero(big.sign() & small.sign())
    } else {
        big
    }
}

fn close(big: Fp32, small: Fp32) -> Fp32 {
    let d = big.exponent() - small.exponent();
    let diff = (big.significand() << 1) - (small.significand() << (1 - d));
    let eb = big.exponent() as i32;

    if diff >= 1 << 24 {
        pack(big.sign(), eb, round_shift(u128::from(diff), 1))
    } else {
        let lz = diff.leading_zeros() - 8;
        pack(big.sign(), eb - 1 - lz as i32, u128::from(diff << lz))
    }
}

fn far(big: Fp32, small: Fp32) -> Fp32 {
    let d = big.exponent() - small.exponent();
    let a = u64::from(big.significand()) << FAR_GUARD_BITS;
    let b_full = u64::from(small.significand()) << FAR_GUARD_BITS;
    let b = if d >= 63 {
        1
    } else {
        let lost = b_full & ((1u64 << d) - 1);
        (b_full >> d) | u64::from(lost != 0)
    };

    let sum = if big.sign() == small.sign() { a + b } else { a - b };
    let msb = 63 - sum.leading_zeros();
    let sig = round_shift(u128::from(sum), msb - 23);
    let exp = big.exponent() as i32 + msb as i32 - FAR_HIDDEN_POS as i32;
    pack(big.sign(), exp, sig)
}
