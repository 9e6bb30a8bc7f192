//! Instruction kinds and the decoded instruction descriptor.
//!
//! Provides bit extraction for the raw word fields and the immutable [`Instruction`]
//! value the rest of the machine works with. Each [`InstKind`] carries a static
//! description of its operand shape, which both the decoder and the encoder consult
//! so the two stay inverse to each other.

use serde::Serialize;

use crate::common::reg::{RegClass, RegId};
use crate::isa::opcodes::{alu, alui, branch, class, conv, falu, load, store, sys};

/// Bit shift of the opcode class field (bits 28-31).
pub const CLASS_SHIFT: u32 = 28;
/// Bit mask for the opcode class field.
pub const CLASS_MASK: u32 = 0xF;
/// Bit shift of the first source register field (bits 23-27).
pub const RS1_SHIFT: u32 = 23;
/// Bit shift of the second source register field (bits 18-22).
pub const RS2_SHIFT: u32 = 18;
/// Bit shift of the destination register field (bits 13-17).
pub const RD_SHIFT: u32 = 13;
/// Bit mask for any 5-bit register field.
pub const REG_MASK: u32 = 0x1F;
/// Bit mask for the funct field (bits 0-2).
pub const FUNCT_MASK: u32 = 0x7;

/// Trait for extracting fixed-position fields from an encoded word.
pub trait InstructionBits {
    /// Opcode class (bits 28-31).
    fn class(&self) -> u32;
    /// First source register index (bits 23-27).
    fn rs1(&self) -> u8;
    /// Second source register index (bits 18-22).
    fn rs2(&self) -> u8;
    /// Destination register index (bits 13-17).
    fn rd(&self) -> u8;
    /// Funct code (bits 0-2).
    fn funct(&self) -> u32;
}

impl InstructionBits for u32 {
    #[inline(always)]
    fn class(&self) -> u32 {
        (self >> CLASS_SHIFT) & CLASS_MASK
    }

    #[inline(always)]
    fn rs1(&self) -> u8 {
        ((self >> RS1_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rs2(&self) -> u8 {
        ((self >> RS2_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn rd(&self) -> u8 {
        ((self >> RD_SHIFT) & REG_MASK) as u8
    }

    #[inline(always)]
    fn funct(&self) -> u32 {
        self & FUNCT_MASK
    }
}

/// Bit layout of the immediate field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layout {
    /// Three register fields, no immediate.
    R,
    /// Split 15-bit immediate: imm[14:10] in bits 18-22, imm[9:0] in bits 3-12.
    I,
    /// Contiguous 15-bit immediate in bits 3-17.
    BS,
    /// 20-bit immediate: imm[19:10] in bits 18-27, imm[9:0] in bits 3-12.
    JU,
    /// No operand fields.
    Sys,
}

impl Layout {
    /// Width of the sign-extended immediate, if the layout has one.
    pub const fn imm_bits(self) -> Option<u32> {
        match self {
            Self::I | Self::BS => Some(15),
            Self::JU => Some(20),
            Self::R | Self::Sys => None,
        }
    }
}

/// Execution unit an instruction is routed to at dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ExecUnit {
    /// One of the two single-cycle integer ALUs.
    Alu,
    /// The branch resolution unit.
    Branch,
    /// The 3-stage memory-access pipeline.
    Memory,
    /// The non-pipelined divide/sqrt/convert/move unit.
    MultiCycleFpu,
    /// The pipelined add/subtract/multiply unit.
    PipelinedFpu,
    /// No unit: the instruction retires at dispatch.
    Trivial,
}

/// Operation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum InstKind {
    Add,
    Sub,
    Sll,
    Srl,
    Sra,
    And,
    Or,
    Xor,
    Addi,
    Slli,
    Srli,
    Srai,
    Andi,
    Ori,
    Xori,
    Fadd,
    Fsub,
    Fmul,
    Fdiv,
    Fsqrt,
    Fneg,
    Fabs,
    Fmv,
    Beq,
    Bne,
    Blt,
    Bge,
    Fbeq,
    Fblt,
    Jal,
    Jalr,
    Sw,
    Fsw,
    Send,
    Lw,
    Flw,
    Recv,
    Rready,
    Lui,
    Itof,
    Ftoi,
    Fmvif,
    Fmvfi,
    Nop,
}

/// Register classes of each operand slot, `None` where the slot is unused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperandShape {
    /// Destination register class.
    pub rd: Option<RegClass>,
    /// First source register class.
    pub rs1: Option<RegClass>,
    /// Second source register class.
    pub rs2: Option<RegClass>,
    /// Whether the immediate field is meaningful.
    pub imm: bool,
}

const I: Option<RegClass> = Some(RegClass::Int);
const F: Option<RegClass> = Some(RegClass::Float);
const NO: Option<RegClass> = None;

const fn shape(
    rd: Option<RegClass>,
    rs1: Option<RegClass>,
    rs2: Option<RegClass>,
    imm: bool,
) -> OperandShape {
    OperandShape { rd, rs1, rs2, imm }
}

impl InstKind {
    /// Every kind, in encoding order.
    pub const ALL: [Self; 44] = [
        Self::Add,
        Self::Sub,
        Self::Sll,
        Self::Srl,
        Self::Sra,
        Self::And,
        Self::Or,
        Self::Xor,
        Self::Addi,
        Self::Slli,
        Self::Srli,
        Self::Srai,
        Self::Andi,
        Self::Ori,
        Self::Xori,
        Self::Fadd,
        Self::Fsub,
        Self::Fmul,
        Self::Fdiv,
        Self::Fsqrt,
        Self::Fneg,
        Self::Fabs,
        Self::Fmv,
        Self::Beq,
        Self::Bne,
        Self::Blt,
        Self::Bge,
        Self::Fbeq,
        Self::Fblt,
        Self::Jal,
        Self::Jalr,
        Self::Sw,
        Self::Fsw,
        Self::Send,
        Self::Lw,
        Self::Flw,
        Self::Recv,
        Self::Rready,
        Self::Lui,
        Self::Itof,
        Self::Ftoi,
        Self::Fmvif,
        Self::Fmvfi,
        Self::Nop,
    ];

    /// Maps an opcode class and funct code to a kind.
    pub const fn from_class_funct(cls: u32, funct: u32) -> Option<Self> {
        let kind = match (cls, funct) {
            (class::ALU, alu::ADD) => Self::Add,
            (class::ALU, alu::SUB) => Self::Sub,
            (class::ALU, alu::SLL) => Self::Sll,
            (class::ALU, alu::SRL) => Self::Srl,
            (class::ALU, alu::SRA) => Self::Sra,
            (class::ALU, alu::AND) => Self::And,
            (class::ALU, alu::OR) => Self::Or,
            (class::ALU, alu::XOR) => Self::Xor,
            (class::ALUI, alui::ADDI) => Self::Addi,
            (class::ALUI, alui::SLLI) => Self::Slli,
            (class::ALUI, alui::SRLI) => Self::Srli,
            (class::ALUI, alui::SRAI) => Self::Srai,
            (class::ALUI, alui::ANDI) => Self::Andi,
            (class::ALUI, alui::ORI) => Self::Ori,
            (class::ALUI, alui::XORI) => Self::Xori,
            (class::FALU, falu::FADD) => Self::Fadd,
            (class::FALU, falu::FSUB) => Self::Fsub,
            (class::FALU, falu::FMUL) => Self::Fmul,
            (class::FALU, falu::FDIV) => Self::Fdiv,
            (class::FALU, falu::FSQRT) => Self::Fsqrt,
            (class::FALU, falu::FNEG) => Self::Fneg,
            (class::FALU, falu::FABS) => Self::Fabs,
            (class::FALU, falu::FMV) => Self::Fmv,
            (class::BRANCH, branch::BEQ) => Self::Beq,
            (class::BRANCH, branch::BNE) => Self::Bne,
            (class::BRANCH, branch::BLT) => Self::Blt,
            (class::BRANCH, branch::BGE) => Self::Bge,
            (class::BRANCH, branch::FBEQ) => Self::Fbeq,
            (class::BRANCH, branch::FBLT) => Self::Fblt,
            (class::JAL, 0) => Self::Jal,
            (class::JALR, 0) => Self::Jalr,
            (class::STORE, store::SW) => Self::Sw,
            (class::STORE, store::FSW) => Self::Fsw,
            (class::STORE, store::SEND) => Self::Send,
            (class::LOAD, load::LW) => Self::Lw,
            (class::LOAD, load::FLW) => Self::Flw,
            (class::LOAD, load::RECV) => Self::Recv,
            (class::LOAD, load::RREADY) => Self::Rready,
            (class::LUI, 0) => Self::Lui,
            (class::CONV, conv::ITOF) => Self::Itof,
            (class::CONV, conv::FTOI) => Self::Ftoi,
            (class::CONV, conv::FMVIF) => Self::Fmvif,
            (class::CONV, conv::FMVFI) => Self::Fmvfi,
            (class::SYS, sys::NOP) => Self::Nop,
            _ => return None,
        };
        Some(kind)
    }

    /// Opcode class and funct code of this kind.
    pub const fn class_funct(self) -> (u32, u32) {
        match self {
            Self::Add => (class::ALU, alu::ADD),
            Self::Sub => (class::ALU, alu::SUB),
            Self::Sll => (class::ALU, alu::SLL),
            Self::Srl => (class::ALU, alu::SRL),
            Self::Sra => (class::ALU, alu::SRA),
            Self::And => (class::ALU, alu::AND),
            Self::Or => (class::ALU, alu::OR),
            Self::Xor => (class::ALU, alu::XOR),
            Self::Addi => (class::ALUI, alui::ADDI),
            Self::Slli => (class::ALUI, alui::SLLI),
            Self::Srli => (class::ALUI, alui::SRLI),
            Self::Srai => (class::ALUI, alui::SRAI),
            Self::Andi => (class::ALUI, alui::ANDI),
            Self::Ori => (class::ALUI, alui::ORI),
            Self::Xori => (class::ALUI, alui::XORI),
            Self::Fadd => (class::FALU, falu::FADD),
            Self::Fsub => (class::FALU, falu::FSUB),
            Self::Fmul => (class::FALU, falu::FMUL),
            Self::Fdiv => (class::FALU, falu::FDIV),
            Self::Fsqrt => (class::FALU, falu::FSQRT),
            Self::Fneg => (class::FALU, falu::FNEG),
            Self::Fabs => (class::FALU, falu::FABS),
            Self::Fmv => (class::FALU, falu::FMV),
            Self::Beq => (class::BRANCH, branch::BEQ),
            Self::Bne => (class::BRANCH, branch::BNE),
            Self::Blt => (class::BRANCH, branch::BLT),
            Self::Bge => (class::BRANCH, branch::BGE),
            Self::Fbeq => (class::BRANCH, branch::FBEQ),
            Self::Fblt => (class::BRANCH, branch::FBLT),
            Self::Jal => (class::JAL, 0),
            Self::Jalr => (class::JALR, 0),
            Self::Sw => (class::STORE, store::SW),
            Self::Fsw => (class::STORE, store::FSW),
            Self::Send => (class::STORE, store::SEND),
            Self::Lw => (class::LOAD, load::LW),
            Self::Flw => (class::LOAD, load::FLW),
            Self::Recv => (class::LOAD, load::RECV),
            Self::Rready => (class::LOAD, load::RREADY),
            Self::Lui => (class::LUI, 0),
            Self::Itof => (class::CONV, conv::ITOF),
            Self::Ftoi => (class::CONV, conv::FTOI),
            Self::Fmvif => (class::CONV, conv::FMVIF),
            Self::Fmvfi => (class::CONV, conv::FMVFI),
            Self::Nop => (class::SYS, sys::NOP),
        }
    }

    /// Immediate layout used by this kind's opcode class.
    pub const fn layout(self) -> Layout {
        match self.class_funct().0 {
            class::ALU | class::FALU | class::CONV => Layout::R,
            class::ALUI | class::JALR | class::LOAD => Layout::I,
            class::BRANCH | class::STORE => Layout::BS,
            class::JAL | class::LUI => Layout::JU,
            _ => Layout::Sys,
        }
    }

    /// Which operand slots this kind uses and in which register bank.
    pub const fn shape(self) -> OperandShape {
        match self {
            Self::Add
            | Self::Sub
            | Self::Sll
            | Self::Srl
            | Self::Sra
            | Self::And
            | Self::Or
            | Self::Xor => shape(I, I, I, false),
            Self::Addi
            | Self::Slli
            | Self::Srli
            | Self::Srai
            | Self::Andi
            | Self::Ori
            | Self::Xori
            | Self::Jalr
            | Self::Lw => shape(I, I, NO, true),
            Self::Fadd | Self::Fsub | Self::Fmul | Self::Fdiv => shape(F, F, F, false),
            Self::Fsqrt | Self::Fneg | Self::Fabs | Self::Fmv => shape(F, F, NO, false),
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Sw => shape(NO, I, I, true),
            Self::Fbeq | Self::Fblt => shape(NO, F, F, true),
            Self::Jal | Self::Lui => shape(I, NO, NO, true),
            Self::Fsw => shape(NO, I, F, true),
            Self::Send => shape(NO, NO, I, false),
            Self::Flw => shape(F, I, NO, true),
            Self::Recv | Self::Rready => shape(I, NO, NO, false),
            Self::Itof | Self::Fmvif => shape(F, I, NO, false),
            Self::Ftoi | Self::Fmvfi => shape(I, F, NO, false),
            Self::Nop => shape(NO, NO, NO, false),
        }
    }

    /// Execution unit that owns this kind.
    pub const fn unit(self) -> ExecUnit {
        match self {
            Self::Add
            | Self::Sub
            | Self::Sll
            | Self::Srl
            | Self::Sra
            | Self::And
            | Self::Or
            | Self::Xor
            | Self::Addi
            | Self::Slli
            | Self::Srli
            | Self::Srai
            | Self::Andi
            | Self::Ori
            | Self::Xori
            | Self::Lui => ExecUnit::Alu,
            Self::Beq
            | Self::Bne
            | Self::Blt
            | Self::Bge
            | Self::Fbeq
            | Self::Fblt
            | Self::Jal
            | Self::Jalr => ExecUnit::Branch,
            Self::Sw
            | Self::Fsw
            | Self::Send
            | Self::Lw
            | Self::Flw
            | Self::Recv
            | Self::Rready => ExecUnit::Memory,
            Self::Fadd | Self::Fsub | Self::Fmul => ExecUnit::PipelinedFpu,
            Self::Fdiv
            | Self::Fsqrt
            | Self::Fneg
            | Self::Fabs
            | Self::Fmv
            | Self::Itof
            | Self::Ftoi
            | Self::Fmvif
            | Self::Fmvfi => ExecUnit::MultiCycleFpu,
            Self::Nop => ExecUnit::Trivial,
        }
    }

    /// Conditional branches consult the direction predictor.
    pub const fn is_conditional_branch(self) -> bool {
        matches!(
            self,
            Self::Beq | Self::Bne | Self::Blt | Self::Bge | Self::Fbeq | Self::Fblt
        )
    }

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Sub => "sub",
            Self::Sll => "sll",
            Self::Srl => "srl",
            Self::Sra => "sra",
            Self::And => "and",
            Self::Or => "or",
            Self::Xor => "xor",
            Self::Addi => "addi",
            Self::Slli => "slli",
            Self::Srli => "srli",
            Self::Srai => "srai",
            Self::Andi => "andi",
            Self::Ori => "ori",
            Self::Xori => "xori",
            Self::Fadd => "fadd",
            Self::Fsub => "fsub",
            Self::Fmul => "fmul",
            Self::Fdiv => "fdiv",
            Self::Fsqrt => "fsqrt",
            Self::Fneg => "fneg",
            Self::Fabs => "fabs",
            Self::Fmv => "fmv",
            Self::Beq => "beq",
            Self::Bne => "bne",
            Self::Blt => "blt",
            Self::Bge => "bge",
            Self::Fbeq => "fbeq",
            Self::Fblt => "fblt",
            Self::Jal => "jal",
            Self::Jalr => "jalr",
            Self::Sw => "sw",
            Self::Fsw => "fsw",
            Self::Send => "send",
            Self::Lw => "lw",
            Self::Flw => "flw",
            Self::Recv => "recv",
            Self::Rready => "rready",
            Self::Lui => "lui",
            Self::Itof => "itof",
            Self::Ftoi => "ftoi",
            Self::Fmvif => "fmvif",
            Self::Fmvfi => "fmvfi",
            Self::Nop => "nop",
        }
    }
}

/// A decoded instruction. Never mutated after decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// Operation kind.
    pub kind: InstKind,
    /// Destination register, if the kind writes one.
    pub rd: Option<RegId>,
    /// First source register, if the kind reads one.
    pub rs1: Option<RegId>,
    /// Second source register, if the kind reads one.
    pub rs2: Option<RegId>,
    /// Sign-extended immediate, if the kind has one.
    pub imm: Option<i32>,
}

impl Instruction {
    /// The neutral instruction.
    pub const NOP: Self = Self {
        kind: InstKind::Nop,
        rd: None,
        rs1: None,
        rs2: None,
        imm: None,
    };

    /// Builds an instruction from raw field values, keeping only the fields the kind uses.
    ///
    /// # Arguments
    ///
    /// * `kind` - Operation kind.
    /// * `rd`, `rs1`, `rs2` - Register indices (masked to 5 bits).
    /// * `imm` - Immediate value, already sign-extended.
    pub const fn from_fields(kind: InstKind, rd: u8, rs1: u8, rs2: u8, imm: i32) -> Self {
        let s = kind.shape();
        Self {
            kind,
            rd: reg(s.rd, rd),
            rs1: reg(s.rs1, rs1),
            rs2: reg(s.rs2, rs2),
            imm: if s.imm { Some(imm) } else { None },
        }
    }

    /// Destination register, excluding the hardwired register 0.
    pub fn dest(&self) -> Option<RegId> {
        self.rd.filter(|r| !r.is_zero())
    }

    /// Source registers that carry a dependency (register 0 never does).
    pub fn sources(&self) -> impl Iterator<Item = RegId> + '_ {
        [self.rs1, self.rs2]
            .into_iter()
            .flatten()
            .filter(|r| !r.is_zero())
    }

    /// Whether this instruction reads `reg`.
    pub fn reads(&self, reg: RegId) -> bool {
        self.sources().any(|r| r == reg)
    }

    /// Owning execution unit.
    pub const fn unit(&self) -> ExecUnit {
        self.kind.unit()
    }

    /// Branches and jumps.
    pub const fn is_control_flow(&self) -> bool {
        matches!(self.kind.unit(), ExecUnit::Branch)
    }

    /// Immediate, or zero for kinds without one.
    pub fn imm_or_zero(&self) -> i32 {
        self.imm.unwrap_or(0)
    }
}

const fn reg(class: Option<RegClass>, index: u8) -> Option<RegId> {
    match class {
        Some(class) => Some(RegId {
            class,
            index: index & (REG_MASK as u8),
        }),
        None => None,
    }
}
