//! Single-precision bit pattern.
//!
//! Every FPU operation consumes and produces a raw 32-bit pattern. [`Fp32`] wraps that
//! pattern and offers the reinterpretations the algorithms need: as a signed or
//! unsigned integer, as a host float (for display and reference checks only), or as
//! a sign/exponent/mantissa triple.

use std::fmt;

/// Bit mask for the sign bit (bit 31).
pub const SIGN_BIT: u32 = 0x8000_0000;
/// Bit mask for everything but the sign.
pub const MAGNITUDE_MASK: u32 = 0x7FFF_FFFF;
/// Bit shift of the biased exponent field.
pub const EXP_SHIFT: u32 = 23;
/// Bit mask for the biased exponent after shifting.
pub const EXP_MASK: u32 = 0xFF;
/// Bit mask for the stored mantissa (fraction) field.
pub const MANT_MASK: u32 = 0x7F_FFFF;
/// The implicit leading one of a normal significand.
pub const HIDDEN_BIT: u32 = 1 << 23;
/// Exponent bias.
pub const BIAS: i32 = 127;
/// Largest biased exponent of a finite value.
pub const MAX_EXP: i32 = 254;

/// A 32-bit value viewed as a single-precision float.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fp32(u32);

impl Fp32 {
    /// Positive zero.
    pub const ZERO: Self = Self(0);

    /// Wraps a raw bit pattern.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw bit pattern.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reinterprets a signed integer's bits.
    pub const fn from_int(value: i32) -> Self {
        Self(value as u32)
    }

    /// The pattern read as a signed integer.
    pub const fn as_int(self) -> i32 {
        self.0 as i32
    }

    /// The pattern read as an unsigned integer.
    pub const fn as_uint(self) -> u32 {
        self.0
    }

    /// Wraps a host float's bits.
    pub const fn from_float(value: f32) -> Self {
        Self(value.to_bits())
    }

    /// The pattern read as a host float.
    pub const fn as_float(self) -> f32 {
        f32::from_bits(self.0)
    }

    /// Assembles a pattern from its fields; each field is masked to width.
    pub const fn from_parts(sign: u32, exponent: u32, mantissa: u32) -> Self {
        Self(((sign & 1) << 31) | ((exponent & EXP_MASK) << EXP_SHIFT) | (mantissa & MANT_MASK))
    }

    /// Sign bit (0 or 1).
    pub const fn sign(self) -> u32 {
        self.0 >> 31
    }

    /// Biased exponent.
    pub const fn exponent(self) -> u32 {
        (self.0 >> EXP_SHIFT) & EXP_MASK
    }

    /// Stored mantissa, without the hidden bit.
    pub const fn mantissa(self) -> u32 {
        self.0 & MANT_MASK
    }

    /// `(sign, biased exponent, mantissa)`.
    pub const fn sign_exponent_mantissa(self) -> (u32, u32, u32) {
        (self.sign(), self.exponent(), self.mantissa())
    }

    /// 24-bit significand with the hidden bit set.
    pub const fn significand(self) -> u32 {
        self.mantissa() | HIDDEN_BIT
    }

    /// Pattern with the sign cleared.
    pub const fn magnitude(self) -> u32 {
        self.0 & MAGNITUDE_MASK
    }

    /// Zero exponent. Denormals are outside the unit's domain and count as zero.
    pub const fn is_zero(self) -> bool {
        self.exponent() == 0
    }

    /// Flips the sign.
    pub const fn neg(self) -> Self {
        Self(self.0 ^ SIGN_BIT)
    }

    /// Clears the sign.
    pub const fn abs(self) -> Self {
        Self(self.0 & MAGNITUDE_MASK)
    }

    /// Signed zero.
    pub const fn zero(sign: u32) -> Self {
        Self::from_parts(sign, 0, 0)
    }

    /// Signed infinity.
    pub const fn infinity(sign: u32) -> Self {
        Self::from_parts(sign, EXP_MASK, 0)
    }
}

impl fmt::Debug for Fp32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (s, e, m) = self.sign_exponent_mantissa();
        write!(f, "Fp32({:#010x} s={s} e={e} m={m:#08x})", self.0)
    }
}

impl From<u32> for Fp32 {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<Fp32> for u32 {
    fn from(value: Fp32) -> Self {
        value.0
    }
}

/// Shifts `value` right by `shift` bits, rounding to nearest with ties to even.
pub(crate) const fn round_shift(value: u128, shift: u32) -> u128 {
    if shift == 0 {
        return value;
    }
    let q = value >> shift;
    let rem = value & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    if rem > half || (rem == half && q & 1 == 1) {
        q + 1
    } else {
        q
    }
}

/// Packs a sign, biased exponent and 24-bit significand into a pattern.
///
/// A significand that rounded up to 2^24 is renormalized. Exponents at or above 255
/// saturate to infinity and exponents at or below zero flush to a signed zero.
pub(crate) const fn pack(sign: u32, exp: i32, sig: u128) -> Fp32 {
    let (exp, sig) = if sig >= (1u128 << 24) {
        (exp + 1, sig >> 1)
    } else {
        (exp, sig)
    };
    if exp > MAX_EXP {
        Fp32::infinity(sign)
    } else if exp <= 0 {
        Fp32::zero(sign)
    } else {
        Fp32::from_parts(sign, exp as u32, sig as u32)
    }
}

/// Distance in units of least precision between two patterns.
///
/// Patterns are mapped onto a monotonic integer line (negative values mirrored), so
/// the distance across a binade boundary or across zero is the number of
/// representable values between them.
pub fn ulp_distance(a: u32, b: u32) -> u64 {
    let key = |x: u32| {
        let mag = i64::from(x & MAGNITUDE_MASK);
        if x & SIGN_BIT == 0 { mag } else { -mag }
    };
    key(a).abs_diff(key(b))
}
