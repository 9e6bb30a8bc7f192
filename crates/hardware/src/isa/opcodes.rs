//! Opcode classes and funct codes.
//!
//! The opcode class occupies bits [31:28] of every word; the funct code occupies
//! bits [2:0] and selects the operation within a class.

/// Opcode classes (bits [31:28]).
pub mod class {
    /// Register-register integer arithmetic.
    pub const ALU: u32 = 0x0;
    /// Register-immediate integer arithmetic.
    pub const ALUI: u32 = 0x1;
    /// Floating-point arithmetic.
    pub const FALU: u32 = 0x2;
    /// Conditional branches (integer and float compares).
    pub const BRANCH: u32 = 0x3;
    /// Jump and link.
    pub const JAL: u32 = 0x4;
    /// Jump and link register.
    pub const JALR: u32 = 0x5;
    /// Stores and external sends.
    pub const STORE: u32 = 0x6;
    /// Loads and external receives.
    pub const LOAD: u32 = 0x7;
    /// Load upper immediate.
    pub const LUI: u32 = 0x8;
    /// Int/float conversions and bit moves.
    pub const CONV: u32 = 0x9;
    /// System instructions.
    pub const SYS: u32 = 0xF;
}

/// Funct codes for [`class::ALU`].
pub mod alu {
    /// `add rd, rs1, rs2`
    pub const ADD: u32 = 0;
    /// `sub rd, rs1, rs2`
    pub const SUB: u32 = 1;
    /// `sll rd, rs1, rs2`
    pub const SLL: u32 = 2;
    /// `srl rd, rs1, rs2`
    pub const SRL: u32 = 3;
    /// `sra rd, rs1, rs2`
    pub const SRA: u32 = 4;
    /// `and rd, rs1, rs2`
    pub const AND: u32 = 5;
    /// `or rd, rs1, rs2`
    pub const OR: u32 = 6;
    /// `xor rd, rs1, rs2`
    pub const XOR: u32 = 7;
}

/// Funct codes for [`class::ALUI`]. Funct 1 is unassigned.
pub mod alui {
    /// `addi rd, rs1, imm`
    pub const ADDI: u32 = 0;
    /// `slli rd, rs1, shamt`
    pub const SLLI: u32 = 2;
    /// `srli rd, rs1, shamt`
    pub const SRLI: u32 = 3;
    /// `srai rd, rs1, shamt`
    pub const SRAI: u32 = 4;
    /// `andi rd, rs1, imm`
    pub const ANDI: u32 = 5;
    /// `ori rd, rs1, imm`
    pub const ORI: u32 = 6;
    /// `xori rd, rs1, imm`
    pub const XORI: u32 = 7;
}

/// Funct codes for [`class::FALU`].
pub mod falu {
    /// `fadd fd, fs1, fs2`
    pub const FADD: u32 = 0;
    /// `fsub fd, fs1, fs2`
    pub const FSUB: u32 = 1;
    /// `fmul fd, fs1, fs2`
    pub const FMUL: u32 = 2;
    /// `fdiv fd, fs1, fs2`
    pub const FDIV: u32 = 3;
    /// `fsqrt fd, fs1`
    pub const FSQRT: u32 = 4;
    /// `fneg fd, fs1`
    pub const FNEG: u32 = 5;
    /// `fabs fd, fs1`
    pub const FABS: u32 = 6;
    /// `fmv fd, fs1`
    pub const FMV: u32 = 7;
}

/// Funct codes for [`class::BRANCH`].
pub mod branch {
    /// `beq rs1, rs2, offset`
    pub const BEQ: u32 = 0;
    /// `bne rs1, rs2, offset`
    pub const BNE: u32 = 1;
    /// `blt rs1, rs2, offset` (signed)
    pub const BLT: u32 = 2;
    /// `bge rs1, rs2, offset` (signed)
    pub const BGE: u32 = 3;
    /// `fbeq fs1, fs2, offset`
    pub const FBEQ: u32 = 4;
    /// `fblt fs1, fs2, offset`
    pub const FBLT: u32 = 5;
}

/// Funct codes for [`class::STORE`].
pub mod store {
    /// `sw rs2, imm(rs1)`
    pub const SW: u32 = 0;
    /// `fsw fs2, imm(rs1)`
    pub const FSW: u32 = 1;
    /// `send rs2`
    pub const SEND: u32 = 2;
}

/// Funct codes for [`class::LOAD`].
pub mod load {
    /// `lw rd, imm(rs1)`
    pub const LW: u32 = 0;
    /// `flw fd, imm(rs1)`
    pub const FLW: u32 = 1;
    /// `recv rd`
    pub const RECV: u32 = 2;
    /// `rready rd`
    pub const RREADY: u32 = 3;
}

/// Funct codes for [`class::CONV`].
pub mod conv {
    /// `itof fd, rs1`: signed integer to float.
    pub const ITOF: u32 = 0;
    /// `ftoi rd, fs1`: float to signed integer.
    pub const FTOI: u32 = 1;
    /// `fmvif fd, rs1`: move integer bits into the float bank.
    pub const FMVIF: u32 = 2;
    /// `fmvfi rd, fs1`: move float bits into the integer bank.
    pub const FMVFI: u32 = 3;
}

/// Funct codes for [`class::SYS`].
pub mod sys {
    /// `nop`
    pub const NOP: u32 = 0;
}
