use serde::{Deserialize, Serialize};
use std::fmt;
use strum::Display;

/// Type tag of a stack value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[strum(serialize_all = "lowercase")]
pub enum WordType {
    Int,
    Double,
    Pointer,
}

/// Tagged runtime value living on the operand stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Word {
    Int(i64),
    Double(f64),
    Pointer(u64),
}

impl Word {
    pub fn ty(&self) -> WordType {
        match self {
            Word::Int(_) => WordType::Int,
            Word::Double(_) => WordType::Double,
            Word::Pointer(_) => WordType::Pointer,
        }
    }

    pub fn to_le_bytes(&self) -> [u8; 8] {
        match self {
            Word::Int(v) => v.to_le_bytes(),
            Word::Double(v) => v.to_le_bytes(),
            Word::Pointer(v) => v.to_le_bytes(),
        }
    }

    /// Reinterprets 8 little-endian bytes as a value of the given type.
    /// Every bit pattern is accepted.
    pub fn from_le_bytes(ty: WordType, bytes: [u8; 8]) -> Word {
        match ty {
            WordType::Int => Word::Int(i64::from_le_bytes(bytes)),
            WordType::Double => Word::Double(f64::from_le_bytes(bytes)),
            WordType::Pointer => Word::Pointer(u64::from_le_bytes(bytes)),
        }
    }
}

/// Format used by `print`.
impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Word::Int(v) => write!(f, "{}", v),
            Word::Double(v) => write!(f, "{:.6}", v),
            Word::Pointer(v) => write!(f, "0x{:x}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_format() {
        assert_eq!(Word::Int(-42).to_string(), "-42");
        assert_eq!(Word::Double(2.5).to_string(), "2.500000");
        assert_eq!(Word::Double(-0.125).to_string(), "-0.125000");
        assert_eq!(Word::Pointer(0x1b).to_string(), "0x1b");
    }

    #[test]
    fn any_bit_pattern_decodes() {
        let bytes = [0xFF; 8];
        assert_eq!(Word::from_le_bytes(WordType::Int, bytes), Word::Int(-1));
        assert_eq!(
            Word::from_le_bytes(WordType::Pointer, bytes),
            Word::Pointer(u64::MAX)
        );
        match Word::from_le_bytes(WordType::Double, bytes) {
            Word::Double(v) => assert!(v.is_nan()),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn little_endian_layout() {
        assert_eq!(Word::Int(1).to_le_bytes(), [1, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(Word::Double(1.0).to_le_bytes(), 1.0f64.to_bits().to_le_bytes());
        assert_eq!(Word::Int(7).ty(), WordType::Int);
    }
}
