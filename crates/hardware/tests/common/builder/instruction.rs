use dualsim_core::isa::{InstKind, Instruction, encode};

/// Fluent construction of a single instruction.
///
/// Fields the kind does not use are dropped by `Instruction::from_fields`, so a
/// builder may set every field without caring about the operand shape.
#[derive(Clone, Copy, Debug)]
pub struct InstructionBuilder {
    kind: InstKind,
    rd: u8,
    rs1: u8,
    rs2: u8,
    imm: i32,
}

impl InstructionBuilder {
    pub const fn new(kind: InstKind) -> Self {
        Self {
            kind,
            rd: 0,
            rs1: 0,
            rs2: 0,
            imm: 0,
        }
    }

    pub const fn rd(mut self, rd: u8) -> Self {
        self.rd = rd;
        self
    }

    pub const fn rs1(mut self, rs1: u8) -> Self {
        self.rs1 = rs1;
        self
    }

    pub const fn rs2(mut self, rs2: u8) -> Self {
        self.rs2 = rs2;
        self
    }

    pub const fn imm(mut self, imm: i32) -> Self {
        self.imm = imm;
        self
    }

    pub const fn build(self) -> Instruction {
        Instruction::from_fields(self.kind, self.rd, self.rs1, self.rs2, self.imm)
    }

    pub fn encode(self) -> u32 {
        encode(&self.build())
    }
}

/// Mnemonic helpers returning decoded instructions.
///
/// Branch and jump offsets are in instructions, relative to the branch itself.
pub mod asm {
    use super::InstructionBuilder as B;
    use dualsim_core::isa::{InstKind, Instruction, encode};

    fn r(kind: InstKind, rd: u8, rs1: u8, rs2: u8) -> Instruction {
        B::new(kind).rd(rd).rs1(rs1).rs2(rs2).build()
    }

    fn i(kind: InstKind, rd: u8, rs1: u8, imm: i32) -> Instruction {
        B::new(kind).rd(rd).rs1(rs1).imm(imm).build()
    }

    fn b(kind: InstKind, rs1: u8, rs2: u8, offset: i32) -> Instruction {
        B::new(kind).rs1(rs1).rs2(rs2).imm(offset).build()
    }

    pub fn add(rd: u8, rs1: u8, rs2: u8) -> Instruction {
        r(InstKind::Add, rd, rs1, rs2)
    }

    pub fn addi(rd: u8, rs1: u8, imm: i32) -> Instruction {
        i(InstKind::Addi, rd, rs1, imm)
    }

    pub fn lui(rd: u8, imm: i32) -> Instruction {
        B::new(InstKind::Lui).rd(rd).imm(imm).build()
    }

    pub fn lw(rd: u8, base: u8, offset: i32) -> Instruction {
        i(InstKind::Lw, rd, base, offset)
    }

    pub fn sw(src: u8, base: u8, offset: i32) -> Instruction {
        b(InstKind::Sw, base, src, offset)
    }

    pub fn flw(fd: u8, base: u8, offset: i32) -> Instruction {
        i(InstKind::Flw, fd, base, offset)
    }

    pub fn fsw(fs: u8, base: u8, offset: i32) -> Instruction {
        b(InstKind::Fsw, base, fs, offset)
    }

    pub fn beq(rs1: u8, rs2: u8, offset: i32) -> Instruction {
        b(InstKind::Beq, rs1, rs2, offset)
    }

    pub fn bne(rs1: u8, rs2: u8, offset: i32) -> Instruction {
        b(InstKind::Bne, rs1, rs2, offset)
    }

    pub fn blt(rs1: u8, rs2: u8, offset: i32) -> Instruction {
        b(InstKind::Blt, rs1, rs2, offset)
    }

    pub fn fblt(fs1: u8, fs2: u8, offset: i32) -> Instruction {
        b(InstKind::Fblt, fs1, fs2, offset)
    }

    pub fn jal(rd: u8, offset: i32) -> Instruction {
        B::new(InstKind::Jal).rd(rd).imm(offset).build()
    }

    pub fn jalr(rd: u8, rs1: u8, offset: i32) -> Instruction {
        i(InstKind::Jalr, rd, rs1, offset)
    }

    pub fn fadd(fd: u8, fs1: u8, fs2: u8) -> Instruction {
        r(InstKind::Fadd, fd, fs1, fs2)
    }

    pub fn fmul(fd: u8, fs1: u8, fs2: u8) -> Instruction {
        r(InstKind::Fmul, fd, fs1, fs2)
    }

    pub fn fdiv(fd: u8, fs1: u8, fs2: u8) -> Instruction {
        r(InstKind::Fdiv, fd, fs1, fs2)
    }

    pub fn fsqrt(fd: u8, fs1: u8) -> Instruction {
        r(InstKind::Fsqrt, fd, fs1, 0)
    }

    pub fn itof(fd: u8, rs1: u8) -> Instruction {
        r(InstKind::Itof, fd, rs1, 0)
    }

    pub fn ftoi(rd: u8, fs1: u8) -> Instruction {
        r(InstKind::Ftoi, rd, fs1, 0)
    }

    pub fn send(rs2: u8) -> Instruction {
        B::new(InstKind::Send).rs2(rs2).build()
    }

    pub fn recv(rd: u8) -> Instruction {
        B::new(InstKind::Recv).rd(rd).build()
    }

    pub fn rready(rd: u8) -> Instruction {
        B::new(InstKind::Rready).rd(rd).build()
    }

    pub const fn nop() -> Instruction {
        Instruction::NOP
    }

    /// Encodes a program into instruction words.
    pub fn program(insts: &[Instruction]) -> Vec<u32> {
        insts.iter().map(encode).collect()
    }
}
