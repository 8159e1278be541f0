use crate::{
    op::OpKind,
    word::{Word, WordType},
};

use color_print::cformat;
use thiserror::Error;

/// Width of every operand in bytes.
pub const OPERAND_SIZE: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub enum Inst {
    HALT(),
    IPUSH(i64),
    DPUSH(f64),
    PPUSH(u64),
    POP(),
    PRINT(),

    IADD(),
    ISUB(),
    IMUL(),
    IDIV(),

    DADD(),
    DSUB(),
    DMUL(),
    DDIV(),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unknown opcode 0x{byte:02X} at 0x{addr:04X}")]
    UnknownOpcode { addr: usize, byte: u8 },

    #[error("`{op}` at 0x{addr:04X} is missing its operand")]
    Truncated { addr: usize, op: OpKind },

    #[error("address 0x{0:04X} is past the end of the program")]
    OutOfRange(usize),
}

impl Inst {
    pub fn kind(&self) -> OpKind {
        match self {
            Inst::HALT() => OpKind::HALT,
            Inst::IPUSH(_) => OpKind::IPUSH,
            Inst::DPUSH(_) => OpKind::DPUSH,
            Inst::PPUSH(_) => OpKind::PPUSH,
            Inst::POP() => OpKind::POP,
            Inst::PRINT() => OpKind::PRINT,
            Inst::IADD() => OpKind::IADD,
            Inst::ISUB() => OpKind::ISUB,
            Inst::IMUL() => OpKind::IMUL,
            Inst::IDIV() => OpKind::IDIV,
            Inst::DADD() => OpKind::DADD,
            Inst::DSUB() => OpKind::DSUB,
            Inst::DMUL() => OpKind::DMUL,
            Inst::DDIV() => OpKind::DDIV,
        }
    }

    /// Builds an instruction from its opcode and, for push-family opcodes,
    /// its operand. Fails if the operand does not match the opcode.
    pub fn new(op: OpKind, operand: Option<Word>) -> Option<Inst> {
        match (op, operand) {
            (OpKind::IPUSH, Some(Word::Int(v))) => Some(Inst::IPUSH(v)),
            (OpKind::DPUSH, Some(Word::Double(v))) => Some(Inst::DPUSH(v)),
            (OpKind::PPUSH, Some(Word::Pointer(v))) => Some(Inst::PPUSH(v)),
            (OpKind::HALT, None) => Some(Inst::HALT()),
            (OpKind::POP, None) => Some(Inst::POP()),
            (OpKind::PRINT, None) => Some(Inst::PRINT()),
            (OpKind::IADD, None) => Some(Inst::IADD()),
            (OpKind::ISUB, None) => Some(Inst::ISUB()),
            (OpKind::IMUL, None) => Some(Inst::IMUL()),
            (OpKind::IDIV, None) => Some(Inst::IDIV()),
            (OpKind::DADD, None) => Some(Inst::DADD()),
            (OpKind::DSUB, None) => Some(Inst::DSUB()),
            (OpKind::DMUL, None) => Some(Inst::DMUL()),
            (OpKind::DDIV, None) => Some(Inst::DDIV()),
            _ => None,
        }
    }

    pub fn operand(&self) -> Option<Word> {
        match self {
            Inst::IPUSH(v) => Some(Word::Int(*v)),
            Inst::DPUSH(v) => Some(Word::Double(*v)),
            Inst::PPUSH(v) => Some(Word::Pointer(*v)),
            _ => None,
        }
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> usize {
        match self.operand() {
            Some(_) => 1 + OPERAND_SIZE,
            None => 1,
        }
    }

    /// Appends the opcode byte and the little-endian operand.
    pub fn encode(&self, out: &mut Vec<u8>) {
        out.push(self.kind().into());
        if let Some(word) = self.operand() {
            out.extend_from_slice(&word.to_le_bytes());
        }
    }

    pub fn to_bin(&self) -> Vec<u8> {
        let mut bin = Vec::with_capacity(self.size());
        self.encode(&mut bin);
        bin
    }

    /// Decodes the instruction starting at `addr`.
    pub fn decode(program: &[u8], addr: usize) -> Result<Inst, DecodeError> {
        let byte = *program.get(addr).ok_or(DecodeError::OutOfRange(addr))?;
        let op = OpKind::try_from(byte).map_err(|_| DecodeError::UnknownOpcode { addr, byte })?;
        let operand = match op.operand() {
            Some(ty) => Some(
                Self::fetch_word(program, addr + 1, ty)
                    .ok_or(DecodeError::Truncated { addr, op })?,
            ),
            None => None,
        };
        // `op` and `operand` agree by construction of `OpKind::operand`.
        Inst::new(op, operand).ok_or(DecodeError::Truncated { addr, op })
    }

    fn fetch_word(program: &[u8], at: usize, ty: WordType) -> Option<Word> {
        let bytes = program.get(at..at + OPERAND_SIZE)?;
        Some(Word::from_le_bytes(ty, bytes.try_into().ok()?))
    }
}

impl Inst {
    pub fn cformat(&self) -> String {
        let name = self.kind().to_string();
        match self {
            Inst::IPUSH(v) => cformat!("<r>{:<6}</><y>{}</>", name, v),
            Inst::DPUSH(v) => cformat!("<r>{:<6}</><y>{:.6}</>", name, v),
            Inst::PPUSH(v) => cformat!("<r>{:<6}</><g>0x{:04X}</>", name, v),
            _ => cformat!("<r>{:<6}</>", name),
        }
    }
}
