//! Instruction word builders
//!
//! Builders for the big-endian MIPS-I instruction words the decoder
//! understands. These are used by the test suites to write programs
//! without hand-assembling bit patterns.

use crate::instr::*;

/// Build an R-type word (opcode 0) from its fields
pub fn rtype(funct: u32, dest: u8, src1: u8, src2: u8, shift: u8) -> u32 {
    (u32::from(src1) << 21)
        | (u32::from(src2) << 16)
        | (u32::from(dest) << 11)
        | (u32::from(shift) << 6)
        | funct
}

/// Build an I-type word from its fields
pub fn itype(opcode: u32, src: u8, dest: u8, immediate: u16) -> u32 {
    (opcode << 26) | (u32::from(src) << 21) | (u32::from(dest) << 16) | u32::from(immediate)
}

/// Build a J-type word from a 26-bit target field
pub fn jtype(opcode: u32, target: u32) -> u32 {
    (opcode << 26) | (target & 0x03ff_ffff)
}

/// Build a REGIMM word (opcode 1) from its fields
pub fn regimm(code: u32, src: u8, offset: i16) -> u32 {
    (OP_REGIMM << 26) | (u32::from(src) << 21) | (code << 16) | u32::from(offset as u16)
}

pub fn add(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_ADD, dest, src1, src2, 0)
}

pub fn addu(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_ADDU, dest, src1, src2, 0)
}

pub fn sub(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_SUB, dest, src1, src2, 0)
}

pub fn subu(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_SUBU, dest, src1, src2, 0)
}

pub fn and(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_AND, dest, src1, src2, 0)
}

pub fn or(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_OR, dest, src1, src2, 0)
}

pub fn xor(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_XOR, dest, src1, src2, 0)
}

pub fn slt(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_SLT, dest, src1, src2, 0)
}

pub fn sltu(dest: u8, src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_SLTU, dest, src1, src2, 0)
}

pub fn sll(dest: u8, src2: u8, shift: u8) -> u32 {
    rtype(FUNCT_SLL, dest, 0, src2, shift)
}

pub fn srl(dest: u8, src2: u8, shift: u8) -> u32 {
    rtype(FUNCT_SRL, dest, 0, src2, shift)
}

pub fn sra(dest: u8, src2: u8, shift: u8) -> u32 {
    rtype(FUNCT_SRA, dest, 0, src2, shift)
}

pub fn sllv(dest: u8, src2: u8, src1: u8) -> u32 {
    rtype(FUNCT_SLLV, dest, src1, src2, 0)
}

pub fn srlv(dest: u8, src2: u8, src1: u8) -> u32 {
    rtype(FUNCT_SRLV, dest, src1, src2, 0)
}

pub fn srav(dest: u8, src2: u8, src1: u8) -> u32 {
    rtype(FUNCT_SRAV, dest, src1, src2, 0)
}

pub fn mult(src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_MULT, 0, src1, src2, 0)
}

pub fn multu(src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_MULTU, 0, src1, src2, 0)
}

pub fn div(src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_DIV, 0, src1, src2, 0)
}

pub fn divu(src1: u8, src2: u8) -> u32 {
    rtype(FUNCT_DIVU, 0, src1, src2, 0)
}

pub fn mfhi(dest: u8) -> u32 {
    rtype(FUNCT_MFHI, dest, 0, 0, 0)
}

pub fn mflo(dest: u8) -> u32 {
    rtype(FUNCT_MFLO, dest, 0, 0, 0)
}

pub fn mthi(src1: u8) -> u32 {
    rtype(FUNCT_MTHI, 0, src1, 0, 0)
}

pub fn mtlo(src1: u8) -> u32 {
    rtype(FUNCT_MTLO, 0, src1, 0, 0)
}

pub fn jr(src1: u8) -> u32 {
    rtype(FUNCT_JR, 0, src1, 0, 0)
}

pub fn jalr(dest: u8, src1: u8) -> u32 {
    rtype(FUNCT_JALR, dest, src1, 0, 0)
}

/// BREAK, decoded by this simulator as the register-dump diagnostic
pub fn regdump() -> u32 {
    rtype(FUNCT_BREAK, 0, 0, 0, 0)
}

pub fn addi(dest: u8, src: u8, immediate: i16) -> u32 {
    itype(OP_ADDI, src, dest, immediate as u16)
}

pub fn addiu(dest: u8, src: u8, immediate: i16) -> u32 {
    itype(OP_ADDIU, src, dest, immediate as u16)
}

pub fn slti(dest: u8, src: u8, immediate: i16) -> u32 {
    itype(OP_SLTI, src, dest, immediate as u16)
}

pub fn sltiu(dest: u8, src: u8, immediate: i16) -> u32 {
    itype(OP_SLTIU, src, dest, immediate as u16)
}

pub fn andi(dest: u8, src: u8, immediate: u16) -> u32 {
    itype(OP_ANDI, src, dest, immediate)
}

pub fn ori(dest: u8, src: u8, immediate: u16) -> u32 {
    itype(OP_ORI, src, dest, immediate)
}

pub fn xori(dest: u8, src: u8, immediate: u16) -> u32 {
    itype(OP_XORI, src, dest, immediate)
}

pub fn lui(dest: u8, immediate: u16) -> u32 {
    itype(OP_LUI, 0, dest, immediate)
}

pub fn lb(dest: u8, base: u8, offset: i16) -> u32 {
    itype(OP_LB, base, dest, offset as u16)
}

pub fn lbu(dest: u8, base: u8, offset: i16) -> u32 {
    itype(OP_LBU, base, dest, offset as u16)
}

pub fn lh(dest: u8, base: u8, offset: i16) -> u32 {
    itype(OP_LH, base, dest, offset as u16)
}

pub fn lhu(dest: u8, base: u8, offset: i16) -> u32 {
    itype(OP_LHU, base, dest, offset as u16)
}

pub fn lw(dest: u8, base: u8, offset: i16) -> u32 {
    itype(OP_LW, base, dest, offset as u16)
}

pub fn lwl(dest: u8, base: u8, offset: i16) -> u32 {
    itype(OP_LWL, base, dest, offset as u16)
}

pub fn lwr(dest: u8, base: u8, offset: i16) -> u32 {
    itype(OP_LWR, base, dest, offset as u16)
}

pub fn sb(src: u8, base: u8, offset: i16) -> u32 {
    itype(OP_SB, base, src, offset as u16)
}

pub fn sh(src: u8, base: u8, offset: i16) -> u32 {
    itype(OP_SH, base, src, offset as u16)
}

pub fn sw(src: u8, base: u8, offset: i16) -> u32 {
    itype(OP_SW, base, src, offset as u16)
}

pub fn beq(src1: u8, src2: u8, offset: i16) -> u32 {
    itype(OP_BEQ, src1, src2, offset as u16)
}

pub fn bne(src1: u8, src2: u8, offset: i16) -> u32 {
    itype(OP_BNE, src1, src2, offset as u16)
}

pub fn bgtz(src: u8, offset: i16) -> u32 {
    itype(OP_BGTZ, src, 0, offset as u16)
}

pub fn blez(src: u8, offset: i16) -> u32 {
    itype(OP_BLEZ, src, 0, offset as u16)
}

pub fn j(target: u32) -> u32 {
    jtype(OP_J, target)
}

pub fn jal(target: u32) -> u32 {
    jtype(OP_JAL, target)
}

pub fn bgez(src: u8, offset: i16) -> u32 {
    regimm(RT_BGEZ, src, offset)
}

pub fn bgezal(src: u8, offset: i16) -> u32 {
    regimm(RT_BGEZAL, src, offset)
}

pub fn bltz(src: u8, offset: i16) -> u32 {
    regimm(RT_BLTZ, src, offset)
}

pub fn bltzal(src: u8, offset: i16) -> u32 {
    regimm(RT_BLTZAL, src, offset)
}
