//! Register and memory rendering for inspection.
//!
//! Values are raw 32-bit patterns; a [`RenderFormat`] picks how to show one.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::isa::disasm::disassemble;

/// How to show a 32-bit value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RenderFormat {
    /// Hex pattern followed by the signed decimal value.
    #[default]
    Default,
    /// Signed decimal.
    Decimal,
    /// 32 binary digits.
    Binary,
    /// `0x`-prefixed, zero-padded hex.
    Hex,
    /// Single-precision value of the pattern.
    Float,
    /// Disassembly of the pattern as an instruction word.
    Instruction,
}

/// A format name that is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown render format `{0}` (expected default, decimal, binary, hex, float or instruction)")]
pub struct UnknownFormat(pub String);

impl FromStr for RenderFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "decimal" | "dec" | "d" => Ok(Self::Decimal),
            "binary" | "bin" | "b" => Ok(Self::Binary),
            "hex" | "hexadecimal" | "x" => Ok(Self::Hex),
            "float" | "f" => Ok(Self::Float),
            "instruction" | "inst" | "i" => Ok(Self::Instruction),
            _ => Err(UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Default => "default",
            Self::Decimal => "decimal",
            Self::Binary => "binary",
            Self::Hex => "hex",
            Self::Float => "float",
            Self::Instruction => "instruction",
        };
        f.write_str(name)
    }
}

impl RenderFormat {
    /// Renders a value.
    pub fn render(self, value: u32) -> String {
        match self {
            Self::Default => format!("{value:#010x} ({})", value as i32),
            Self::Decimal => (value as i32).to_string(),
            Self::Binary => format!("{value:032b}"),
            Self::Hex => format!("{value:#010x}"),
            Self::Float => f32::from_bits(value).to_string(),
            Self::Instruction => disassemble(value),
        }
    }
}
