use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{alu::Alu, word::WordType};

/// Opcode table of instruction set version 1.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    EnumIter,
    Display,
)]
#[repr(u8)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OpKind {
    HALT = 0x00,
    IPUSH = 0x01,
    DPUSH = 0x02,
    PPUSH = 0x03,
    POP = 0x04,
    PRINT = 0x05,
    IADD = 0x06,
    ISUB = 0x07,
    IMUL = 0x08,
    IDIV = 0x09,
    DADD = 0x0A,
    DSUB = 0x0B,
    DMUL = 0x0C,
    DDIV = 0x0D,
}

impl OpKind {
    /// Mnemonics are matched exactly, lowercase only.
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.parse::<Self>() {
            Ok(op) => Ok(op),
            Err(_) => Err(format!("Undefined Op: {s}")),
        }
    }

    /// Type of the 8-byte operand following the opcode, if any.
    pub fn operand(&self) -> Option<WordType> {
        use OpKind::*;
        match self {
            IPUSH => Some(WordType::Int),
            DPUSH => Some(WordType::Double),
            PPUSH => Some(WordType::Pointer),
            _ => None,
        }
    }

    /// Operand family and operation of the arithmetic opcodes.
    pub fn alu(&self) -> Option<(WordType, Alu)> {
        use OpKind::*;
        match self {
            IADD => Some((WordType::Int, Alu::ADD)),
            ISUB => Some((WordType::Int, Alu::SUB)),
            IMUL => Some((WordType::Int, Alu::MUL)),
            IDIV => Some((WordType::Int, Alu::DIV)),
            DADD => Some((WordType::Double, Alu::ADD)),
            DSUB => Some((WordType::Double, Alu::SUB)),
            DMUL => Some((WordType::Double, Alu::MUL)),
            DDIV => Some((WordType::Double, Alu::DIV)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn mnemonic_round_trip() {
        for op in OpKind::iter() {
            assert_eq!(OpKind::parse(&op.to_string()), Ok(op));
            assert_eq!(OpKind::try_from(u8::from(op)), Ok(op));
        }
    }

    #[test]
    fn mnemonics_are_case_sensitive() {
        assert!(OpKind::parse("IPUSH").is_err());
        assert!(OpKind::parse("i32push").is_err());
        assert!(OpKind::parse("hoge").is_err());
    }

    #[test]
    fn opcodes_are_dense() {
        let bytes: Vec<u8> = OpKind::iter().map(u8::from).collect();
        assert_eq!(bytes, (0x00..=0x0D).collect::<Vec<u8>>());
        assert!(OpKind::try_from(0x0E).is_err());
    }

    #[test]
    fn operand_bearing_ops() {
        assert_eq!(OpKind::IPUSH.operand(), Some(WordType::Int));
        assert_eq!(OpKind::DPUSH.operand(), Some(WordType::Double));
        assert_eq!(OpKind::PPUSH.operand(), Some(WordType::Pointer));
        assert_eq!(OpKind::PRINT.operand(), None);
        assert_eq!(OpKind::IADD.alu(), Some((WordType::Int, Alu::ADD)));
        assert_eq!(OpKind::DDIV.alu(), Some((WordType::Double, Alu::DIV)));
        assert_eq!(OpKind::POP.alu(), None);
    }
}
