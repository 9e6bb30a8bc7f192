//! Floating-point square root.
//!
//! The operand is reduced to `x * 2^(2k)` with `x` in `[1, 4)`: `x` is the significand
//! for an even unbiased exponent and twice the significand for an odd one. Each parity
//! has its own 1024-segment table, indexed by the top ten mantissa bits, holding a
//! linear approximation `c + g * (x - x0)` of `sqrt(x)` over the segment. One
//! multiply-accumulate evaluates it and the result is rounded once.
//!
//! Segment constants are derived from integer square roots: `g` is the chord slope and
//! `c` lifts the chord by half its midpoint sag, which balances the error across the
//! segment.

use std::sync::OnceLock;

use super::bits::{BIAS, Fp32, pack, round_shift};

/// Index width of each segment table.
const SEGMENT_BITS: u32 = 10;

/// Segments per parity.
const SEGMENTS: usize = 1 << SEGMENT_BITS;

/// Mantissa bits below the table index.
const OFFSET_BITS: u32 = 23 - SEGMENT_BITS;

/// Fraction bits of the fixed-point table entries.
const FRAC_BITS: u32 = 40;

/// One linear segment: `sqrt(x0 + dx) ≈ base + slope * dx`, both in Q.40.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    /// Value at the segment start, lifted by half the chord sag.
    pub base: u64,
    /// Chord slope.
    pub slope: u64,
}

static TABLES: OnceLock<Vec<Segment>> = OnceLock::new();

/// `sqrt(v / 2^80)` in Q.40.
fn root_q40(v: u128) -> u128 {
    v.isqrt()
}

fn build_segment(odd: bool, i: u128) -> Segment {
    // x0 and the segment width, both scaled by 2^80.
    let (start, width_log2) = if odd {
        ((2u128 << 80) + (i << 71), 71)
    } else {
        ((1u128 << 80) + (i << 70), 70)
    };
    let width = 1u128 << width_log2;
    let s0 = root_q40(start);
    let s1 = root_q40(start + width);
    let mid = root_q40(start + width / 2);
    let sag = mid - (s0 + s1) / 2;
    // Slope per unit x in Q.40: (s1 - s0) / (width / 2^80).
    let slope = (s1 - s0) << (80 - width_log2);
    Segment {
        base: (s0 + sag / 2) as u64,
        slope: slope as u64,
    }
}

/// Both parity tables, even first.
pub fn segments() -> &'static [Segment] {
    TABLES.get_or_init(|| {
        [false, true]
            .into_iter()
            .flat_map(|odd| (0..SEGMENTS as u128).map(move |i| build_segment(odd, i)))
            .collect()
    })
}

/// Square root of a pattern.
///
/// Zero returns the operand unchanged. The sign of other operands is ignored.
pub fn fsqrt(a: Fp32) -> Fp32 {
    if a.is_zero() {
        return a;
    }

    let unbiased = a.exponent() as i32 - BIAS;
    let odd = unbiased & 1 != 0;
    let half = unbiased >> 1;

    let sig = a.significand();
    let idx = ((sig >> OFFSET_BITS) as usize) & (SEGMENTS - 1);
    let seg = segments()[usize::from(odd) * SEGMENTS + idx];

    // Offset into the segment: mantissa units are 2^-23 of the significand, and the
    // odd table runs over twice the significand.
    let offset = u128::from(sig & ((1 << OFFSET_BITS) - 1));
    let dx_shift = if odd { 22 } else { 23 };
    let root = u128::from(seg.base) + ((u128::from(seg.slope) * offset) >> dx_shift);

    pack(0, half + BIAS, round_shift(root, FRAC_BITS - 23))
}
