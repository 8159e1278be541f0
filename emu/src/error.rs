use arch::{binary, inst::DecodeError, op::OpKind, word::WordType, ErrorKind};
use std::io;
use thiserror::Error;

/// Runtime fault raised by a single instruction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Fault {
    #[error("stack overflow at 0x{addr:04X}: capacity is {capacity} words")]
    StackOverflow { addr: usize, capacity: usize },

    #[error("stack underflow at 0x{addr:04X}: `{op}` needs more operands")]
    StackUnderflow { addr: usize, op: OpKind },

    #[error("type mismatch at 0x{addr:04X}: `{op}` expects {expected}, found {found}")]
    TypeMismatch {
        addr: usize,
        op: OpKind,
        expected: WordType,
        found: WordType,
    },

    #[error("division by zero at 0x{addr:04X}")]
    DivisionByZero { addr: usize },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("cannot open file '{0}': {1}")]
    FileOpen(String, #[source] io::Error),

    #[error("'{0}': {1}")]
    Format(String, #[source] binary::Error),

    #[error("invalid dump config '{0}': {1}")]
    Config(String, #[source] serde_yaml::Error),

    #[error(transparent)]
    Fault(#[from] Fault),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Fault(_) => ErrorKind::Runtime,
            Error::FileOpen(..) | Error::Format(..) | Error::Config(..) | Error::Io(_) => {
                ErrorKind::Io
            }
        }
    }
}
