//! Floating-Point Unit (FPU).
//!
//! This module implements the bit-exact single-precision arithmetic used by the
//! pipelined and multi-cycle FPU units. Nothing here touches host floating point:
//! every operation works on the 32-bit pattern with fixed-point significand
//! arithmetic, lookup tables and iterative refinement.
//!
//! Operations are organized into submodules:
//! - [`bits`]: The pattern type and shared rounding/packing helpers.
//! - [`add`]: Three-path adder (special, close, far).
//! - [`mul`]: Split-significand multiplier.
//! - [`div`]: Reciprocal table plus Newton refinement.
//! - [`sqrt`]: Parity-split linear segment tables.
//! - [`convert`]: Integer/float conversions.
//! - [`compare`]: Equality, ordering and sign moves.
//!
//! Denormal inputs are treated as zero and infinities are outside the guaranteed domain.

/// Float pattern type, field accessors and rounding helpers.
pub mod bits;

/// Floating-point adder.
pub mod add;

/// Floating-point multiplier.
pub mod mul;

/// Floating-point divider.
pub mod div;

/// Floating-point square root.
pub mod sqrt;

/// Integer/float conversions.
pub mod convert;

/// Comparisons and sign moves.
pub mod compare;

use crate::common::SimError;
use crate::isa::InstKind;

pub use self::bits::{Fp32, ulp_distance};

/// Floating-Point Unit (FPU) for floating-point operations.
///
/// Stateless: timing (pipelining, busy counters) belongs to the execution units that
/// own an `Fpu` call, not to the arithmetic.
pub struct Fpu;

impl Fpu {
    /// Executes a floating-point operation.
    ///
    /// # Arguments
    ///
    /// * `kind` - The operation; must be owned by one of the two FPU units.
    /// * `a` - First operand pattern (an integer for `itof`/`fmvif`).
    /// * `b` - Second operand pattern, ignored by unary operations.
    ///
    /// # Returns
    ///
    /// The result pattern (an integer for `ftoi`/`fmvfi`), or `SimError::Internal`
    /// when `kind` is not a floating-point operation.
    pub fn execute(kind: InstKind, a: u32, b: u32) -> Result<u32, SimError> {
        let (fa, fb) = (Fp32::from_bits(a), Fp32::from_bits(b));
        let result = match kind {
            InstKind::Fadd => add::fadd(fa, fb).bits(),
            InstKind::Fsub => add::fsub(fa, fb).bits(),
            InstKind::Fmul => mul::fmul(fa, fb).bits(),
            InstKind::Fdiv => div::fdiv(fa, fb).bits(),
            InstKind::Fsqrt => sqrt::fsqrt(fa).bits(),
            InstKind::Fneg => compare::fneg(fa).bits(),
            InstKind::Fabs => compare::fabs(fa).bits(),
            InstKind::Fmv | InstKind::Fmvif | InstKind::Fmvfi => a,
            InstKind::Itof => convert::itof(a as i32).bits(),
            InstKind::Ftoi => convert::ftoi(fa) as u32,
            other => {
                return Err(SimError::Internal(format!(
                    "FPU handed non-float operation `{}`",
                    other.mnemonic()
                )));
            }
        };
        Ok(result)
    }

    /// Evaluates a floating-point branch condition.
    ///
    /// Returns `None` for kinds that are not float compares.
    pub const fn compare(kind: InstKind, a: u32, b: u32) -> Option<bool> {
        let (fa, fb) = (Fp32::from_bits(a), Fp32::from_bits(b));
        match kind {
            InstKind::Fbeq => Some(compare::feq(fa, fb)),
            InstKind::Fblt => Some(compare::flt(fa, fb)),
            _ => None,
        }
    }
}
