//! Instruction decoding
//!
//! This file is where a u32 instruction word is converted into the
//! [`Instruction`] sum type, which holds the instruction fields in a
//! more easily accessible format ready for execution.
//!
//! The primary opcode (bits 31:26) selects the variant: opcode 0 is
//! R-type (sub-dispatched on the funct field), opcode 1 is REGIMM
//! (sub-dispatched on the rt field), opcodes 2 and 3 are the J-type
//! jumps, and every other recognised opcode is I-type.

use std::fmt;

use thiserror::Error;

use crate::fields;

// Primary opcodes
pub const OP_SPECIAL: u32 = 0b000000;
pub const OP_REGIMM: u32 = 0b000001;
pub const OP_J: u32 = 0b000010;
pub const OP_JAL: u32 = 0b000011;
pub const OP_BEQ: u32 = 0b000100;
pub const OP_BNE: u32 = 0b000101;
pub const OP_BLEZ: u32 = 0b000110;
pub const OP_BGTZ: u32 = 0b000111;
pub const OP_ADDI: u32 = 0b001000;
pub const OP_ADDIU: u32 = 0b001001;
pub const OP_SLTI: u32 = 0b001010;
pub const OP_SLTIU: u32 = 0b001011;
pub const OP_ANDI: u32 = 0b001100;
pub const OP_ORI: u32 = 0b001101;
pub const OP_XORI: u32 = 0b001110;
pub const OP_LUI: u32 = 0b001111;
pub const OP_LB: u32 = 0b100000;
pub const OP_LH: u32 = 0b100001;
pub const OP_LWL: u32 = 0b100010;
pub const OP_LW: u32 = 0b100011;
pub const OP_LBU: u32 = 0b100100;
pub const OP_LHU: u32 = 0b100101;
pub const OP_LWR: u32 = 0b100110;
pub const OP_SB: u32 = 0b101000;
pub const OP_SH: u32 = 0b101001;
pub const OP_SW: u32 = 0b101011;

// R-type function codes
pub const FUNCT_SLL: u32 = 0b000000;
pub const FUNCT_SRL: u32 = 0b000010;
pub const FUNCT_SRA: u32 = 0b000011;
pub const FUNCT_SLLV: u32 = 0b000100;
pub const FUNCT_SRLV: u32 = 0b000110;
pub const FUNCT_SRAV: u32 = 0b000111;
pub const FUNCT_JR: u32 = 0b001000;
pub const FUNCT_JALR: u32 = 0b001001;
pub const FUNCT_BREAK: u32 = 0b001101;
pub const FUNCT_MFHI: u32 = 0b010000;
pub const FUNCT_MTHI: u32 = 0b010001;
pub const FUNCT_MFLO: u32 = 0b010010;
pub const FUNCT_MTLO: u32 = 0b010011;
pub const FUNCT_MULT: u32 = 0b011000;
pub const FUNCT_MULTU: u32 = 0b011001;
pub const FUNCT_DIV: u32 = 0b011010;
pub const FUNCT_DIVU: u32 = 0b011011;
pub const FUNCT_ADD: u32 = 0b100000;
pub const FUNCT_ADDU: u32 = 0b100001;
pub const FUNCT_SUB: u32 = 0b100010;
pub const FUNCT_SUBU: u32 = 0b100011;
pub const FUNCT_AND: u32 = 0b100100;
pub const FUNCT_OR: u32 = 0b100101;
pub const FUNCT_XOR: u32 = 0b100110;
pub const FUNCT_SLT: u32 = 0b101010;
pub const FUNCT_SLTU: u32 = 0b101011;

// REGIMM codes (held in the rt field)
pub const RT_BLTZ: u32 = 0b00000;
pub const RT_BGEZ: u32 = 0b00001;
pub const RT_BLTZAL: u32 = 0b10000;
pub const RT_BGEZAL: u32 = 0b10001;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    #[error("could not match function code in instruction 0x{0:08x}")]
    UnknownFunction(u32),
    #[error("could not match REGIMM code in instruction 0x{0:08x}")]
    UnknownRegimmCode(u32),
    #[error("could not match opcode in instruction 0x{0:08x}")]
    UnknownOpcode(u32),
}

/// Operation performed by an R-type instruction (the funct field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Function {
    Jalr,
    Jr,
    Sll,
    Sllv,
    Sra,
    Srav,
    Srl,
    Srlv,
    Slt,
    Sltu,
    Add,
    Addu,
    Sub,
    Subu,
    Div,
    Divu,
    Mfhi,
    Mflo,
    Mthi,
    Mtlo,
    Mult,
    Multu,
    Xor,
    Or,
    And,
}

/// Operation performed by an I-type instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IOpcode {
    Lb,
    Lbu,
    Lh,
    Lhu,
    Lui,
    Lw,
    Lwl,
    Lwr,
    Sb,
    Sh,
    Sw,
    Beq,
    Bgtz,
    Blez,
    Bne,
    Ori,
    Andi,
    Slti,
    Sltiu,
    Xori,
    Addi,
    Addiu,
}

/// The two absolute jumps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JOpcode {
    J,
    Jal,
}

/// Branch-on-register-condition family (primary opcode 1,
/// discriminated by the rt field)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegimmCode {
    Bgez,
    Bgezal,
    Bltz,
    Bltzal,
}

/// Simulator-internal operations with no standard MIPS encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialOpcode {
    /// Dump PC/nPC and all registers to the diagnostic stream
    Regdump,
}

/// A decoded MIPS-I instruction
///
/// Exactly one of five shapes. The 16-bit immediate of the I and
/// REGIMM variants is kept raw; whether it is sign- or zero-extended
/// depends on the opcode, which the executor decides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    R {
        function: Function,
        dest: u8,
        src1: u8,
        src2: u8,
        shift: u8,
    },
    I {
        opcode: IOpcode,
        src: u8,
        dest: u8,
        immediate: u16,
    },
    J {
        opcode: JOpcode,
        target: u32,
    },
    Regimm {
        code: RegimmCode,
        src: u8,
        offset: u16,
    },
    Special {
        opcode: SpecialOpcode,
    },
}

impl Instruction {
    /// Decode a 32-bit big-endian instruction word
    pub fn decode(word: u32) -> Result<Self, DecodeError> {
        match fields::opcode(word) {
            OP_SPECIAL => decode_rtype(word),
            OP_REGIMM => decode_regimm(word),
            OP_J | OP_JAL => decode_jtype(word),
            _ => decode_itype(word),
        }
    }
}

fn decode_rtype(word: u32) -> Result<Instruction, DecodeError> {
    let function = match fields::funct(word) {
        FUNCT_JALR => Function::Jalr,
        FUNCT_JR => Function::Jr,
        FUNCT_SLL => Function::Sll,
        FUNCT_SLLV => Function::Sllv,
        FUNCT_SRA => Function::Sra,
        FUNCT_SRAV => Function::Srav,
        FUNCT_SRL => Function::Srl,
        FUNCT_SRLV => Function::Srlv,
        FUNCT_SLT => Function::Slt,
        FUNCT_SLTU => Function::Sltu,
        FUNCT_ADD => Function::Add,
        FUNCT_ADDU => Function::Addu,
        FUNCT_SUB => Function::Sub,
        FUNCT_SUBU => Function::Subu,
        FUNCT_DIV => Function::Div,
        FUNCT_DIVU => Function::Divu,
        FUNCT_MFHI => Function::Mfhi,
        FUNCT_MFLO => Function::Mflo,
        FUNCT_MTHI => Function::Mthi,
        FUNCT_MTLO => Function::Mtlo,
        FUNCT_MULT => Function::Mult,
        FUNCT_MULTU => Function::Multu,
        FUNCT_XOR => Function::Xor,
        FUNCT_OR => Function::Or,
        FUNCT_AND => Function::And,
        // BREAK doubles as the register-dump diagnostic
        FUNCT_BREAK => {
            return Ok(Instruction::Special {
                opcode: SpecialOpcode::Regdump,
            })
        }
        _ => return Err(DecodeError::UnknownFunction(word)),
    };
    Ok(Instruction::R {
        function,
        dest: fields::rd(word),
        src1: fields::rs(word),
        src2: fields::rt(word),
        shift: fields::shamt(word),
    })
}

fn decode_itype(word: u32) -> Result<Instruction, DecodeError> {
    let opcode = match fields::opcode(word) {
        OP_LB => IOpcode::Lb,
        OP_LBU => IOpcode::Lbu,
        OP_LH => IOpcode::Lh,
        OP_LHU => IOpcode::Lhu,
        OP_LUI => IOpcode::Lui,
        OP_LW => IOpcode::Lw,
        OP_LWL => IOpcode::Lwl,
        OP_LWR => IOpcode::Lwr,
        OP_SB => IOpcode::Sb,
        OP_SH => IOpcode::Sh,
        OP_SW => IOpcode::Sw,
        OP_BEQ => IOpcode::Beq,
        OP_BGTZ => IOpcode::Bgtz,
        OP_BLEZ => IOpcode::Blez,
        OP_BNE => IOpcode::Bne,
        OP_ORI => IOpcode::Ori,
        OP_ANDI => IOpcode::Andi,
        OP_SLTI => IOpcode::Slti,
        OP_SLTIU => IOpcode::Sltiu,
        OP_XORI => IOpcode::Xori,
        OP_ADDI => IOpcode::Addi,
        OP_ADDIU => IOpcode::Addiu,
        _ => return Err(DecodeError::UnknownOpcode(word)),
    };
    Ok(Instruction::I {
        opcode,
        src: fields::rs(word),
        dest: fields::rt(word),
        immediate: fields::immediate(word),
    })
}

fn decode_jtype(word: u32) -> Result<Instruction, DecodeError> {
    let opcode = match fields::opcode(word) {
        OP_J => JOpcode::J,
        OP_JAL => JOpcode::Jal,
        _ => return Err(DecodeError::UnknownOpcode(word)),
    };
    Ok(Instruction::J {
        opcode,
        target: fields::target(word),
    })
}

fn decode_regimm(word: u32) -> Result<Instruction, DecodeError> {
    let code = match u32::from(fields::rt(word)) {
        RT_BGEZ => RegimmCode::Bgez,
        RT_BGEZAL => RegimmCode::Bgezal,
        RT_BLTZ => RegimmCode::Bltz,
        RT_BLTZAL => RegimmCode::Bltzal,
        _ => return Err(DecodeError::UnknownRegimmCode(word)),
    };
    Ok(Instruction::Regimm {
        code,
        src: fields::rs(word),
        offset: fields::immediate(word),
    })
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self {
            Function::Jalr => "jalr",
            Function::Jr => "jr",
            Function::Sll => "sll",
            Function::Sllv => "sllv",
            Function::Sra => "sra",
            Function::Srav => "srav",
            Function::Srl => "srl",
            Function::Srlv => "srlv",
            Function::Slt => "slt",
            Function::Sltu => "sltu",
            Function::Add => "add",
            Function::Addu => "addu",
            Function::Sub => "sub",
            Function::Subu => "subu",
            Function::Div => "div",
            Function::Divu => "divu",
            Function::Mfhi => "mfhi",
            Function::Mflo => "mflo",
            Function::Mthi => "mthi",
            Function::Mtlo => "mtlo",
            Function::Mult => "mult",
            Function::Multu => "multu",
            Function::Xor => "xor",
            Function::Or => "or",
            Function::And => "and",
        };
        f.write_str(mnemonic)
    }
}

impl fmt::Display for IOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = match self {
            IOpcode::Lb => "lb",
            IOpcode::Lbu => "lbu",
            IOpcode::Lh => "lh",
            IOpcode::Lhu => "lhu",
            IOpcode::Lui => "lui",
            IOpcode::Lw => "lw",
            IOpcode::Lwl => "lwl",
            IOpcode::Lwr => "lwr",
            IOpcode::Sb => "sb",
            IOpcode::Sh => "sh",
            IOpcode::Sw => "sw",
            IOpcode::Beq => "beq",
            IOpcode::Bgtz => "bgtz",
            IOpcode::Blez => "blez",
            IOpcode::Bne => "bne",
            IOpcode::Ori => "ori",
            IOpcode::Andi => "andi",
            IOpcode::Slti => "slti",
            IOpcode::Sltiu => "sltiu",
            IOpcode::Xori => "xori",
            IOpcode::Addi => "addi",
            IOpcode::Addiu => "addiu",
        };
        f.write_str(mnemonic)
    }
}

impl fmt::Display for JOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JOpcode::J => "j",
            JOpcode::Jal => "jal",
        })
    }
}

impl fmt::Display for RegimmCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegimmCode::Bgez => "bgez",
            RegimmCode::Bgezal => "bgezal",
            RegimmCode::Bltz => "bltz",
            RegimmCode::Bltzal => "bltzal",
        })
    }
}

impl fmt::Display for SpecialOpcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SpecialOpcode::Regdump => "regdump",
        })
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Instruction::R {
                function,
                dest,
                src1,
                src2,
                shift,
            } => match function {
                Function::Jr => write!(f, "{function} ${src1}"),
                Function::Jalr => write!(f, "{function} ${dest}, ${src1}"),
                Function::Sll | Function::Srl | Function::Sra => {
                    write!(f, "{function} ${dest}, ${src2}, {shift}")
                }
                Function::Sllv | Function::Srlv | Function::Srav => {
                    write!(f, "{function} ${dest}, ${src2}, ${src1}")
                }
                Function::Mfhi | Function::Mflo => write!(f, "{function} ${dest}"),
                Function::Mthi | Function::Mtlo => write!(f, "{function} ${src1}"),
                Function::Mult | Function::Multu | Function::Div | Function::Divu => {
                    write!(f, "{function} ${src1}, ${src2}")
                }
                _ => write!(f, "{function} ${dest}, ${src1}, ${src2}"),
            },
            Instruction::I {
                opcode,
                src,
                dest,
                immediate,
            } => match opcode {
                IOpcode::Lb
                | IOpcode::Lbu
                | IOpcode::Lh
                | IOpcode::Lhu
                | IOpcode::Lw
                | IOpcode::Lwl
                | IOpcode::Lwr
                | IOpcode::Sb
                | IOpcode::Sh
                | IOpcode::Sw => {
                    write!(f, "{opcode} ${dest}, {}(${src})", *immediate as i16)
                }
                IOpcode::Lui => write!(f, "{opcode} ${dest}, 0x{immediate:x}"),
                IOpcode::Beq | IOpcode::Bne => {
                    write!(f, "{opcode} ${src}, ${dest}, {}", *immediate as i16)
                }
                IOpcode::Bgtz | IOpcode::Blez => {
                    write!(f, "{opcode} ${src}, {}", *immediate as i16)
                }
                IOpcode::Andi | IOpcode::Ori | IOpcode::Xori => {
                    write!(f, "{opcode} ${dest}, ${src}, 0x{immediate:x}")
                }
                _ => write!(f, "{opcode} ${dest}, ${src}, {}", *immediate as i16),
            },
            Instruction::J { opcode, target } => write!(f, "{opcode} 0x{:08x}", target << 2),
            Instruction::Regimm { code, src, offset } => {
                write!(f, "{code} ${src}, {}", *offset as i16)
            }
            Instruction::Special { opcode } => write!(f, "{opcode}"),
        }
    }
}

#[cfg(test)]
mod tests {

    use quickcheck_macros::quickcheck;

    use super::*;
    use crate::encode;

    #[test]
    fn check_decode_rtype() {
        let word = encode::add(1, 2, 3);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::R {
                function: Function::Add,
                dest: 1,
                src1: 2,
                src2: 3,
                shift: 0,
            }
        );
    }

    #[test]
    fn check_decode_shift() {
        let word = encode::sll(4, 2, 12);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::R {
                function: Function::Sll,
                dest: 4,
                src1: 0,
                src2: 2,
                shift: 12,
            }
        );
    }

    #[test]
    fn check_decode_itype() {
        let word = encode::ori(2, 0, 0x2a);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::I {
                opcode: IOpcode::Ori,
                src: 0,
                dest: 2,
                immediate: 0x2a,
            }
        );
    }

    #[test]
    fn check_decode_negative_immediate() {
        let word = encode::addi(5, 3, -1);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::I {
                opcode: IOpcode::Addi,
                src: 3,
                dest: 5,
                immediate: 0xffff,
            }
        );
    }

    #[test]
    fn check_decode_jtype() {
        let word = encode::jal(0x040_0100);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::J {
                opcode: JOpcode::Jal,
                target: 0x040_0100,
            }
        );
    }

    #[test]
    fn check_decode_regimm() {
        let word = encode::bgezal(7, -2);
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::Regimm {
                code: RegimmCode::Bgezal,
                src: 7,
                offset: 0xfffe,
            }
        );
    }

    #[test]
    fn check_decode_regdump() {
        let word = encode::regdump();
        assert_eq!(
            Instruction::decode(word).unwrap(),
            Instruction::Special {
                opcode: SpecialOpcode::Regdump,
            }
        );
    }

    #[test]
    fn check_unknown_funct_is_invalid() {
        // funct 0b111111 is not assigned
        let word = 0x0000_003f;
        assert_eq!(
            Instruction::decode(word),
            Err(DecodeError::UnknownFunction(word))
        );
    }

    #[test]
    fn check_unknown_opcode_is_invalid() {
        // opcode 0b111111 is not assigned
        let word = 0xfc00_0000;
        assert_eq!(
            Instruction::decode(word),
            Err(DecodeError::UnknownOpcode(word))
        );
    }

    #[test]
    fn check_unknown_regimm_code_is_invalid() {
        // rt 0b00010 is not a REGIMM code
        let word = (OP_REGIMM << 26) | (2 << 16);
        assert_eq!(
            Instruction::decode(word),
            Err(DecodeError::UnknownRegimmCode(word))
        );
    }

    #[test]
    fn check_display() {
        let show = |word| Instruction::decode(word).unwrap().to_string();
        assert_eq!(show(encode::add(1, 2, 3)), "add $1, $2, $3");
        assert_eq!(show(encode::sll(4, 2, 12)), "sll $4, $2, 12");
        assert_eq!(show(encode::lw(2, 3, -8)), "lw $2, -8($3)");
        assert_eq!(show(encode::sw(2, 3, 4)), "sw $2, 4($3)");
        assert_eq!(show(encode::lui(1, 0x1234)), "lui $1, 0x1234");
        assert_eq!(show(encode::beq(1, 2, -1)), "beq $1, $2, -1");
        assert_eq!(show(encode::ori(2, 0, 0x2a)), "ori $2, $0, 0x2a");
        assert_eq!(show(encode::j(0x100)), "j 0x00000400");
        assert_eq!(show(encode::bltz(9, 5)), "bltz $9, 5");
        assert_eq!(show(encode::jr(31)), "jr $31");
        assert_eq!(show(encode::regdump()), "regdump");
    }

    /// Decoding depends only on the 32 bits of the word
    #[quickcheck]
    fn check_decode_deterministic(word: u32) -> bool {
        Instruction::decode(word) == Instruction::decode(word)
    }
}
