use arch::{binary, op::OpKind, ErrorKind};
use color_print::{cformat, ceprintln};
use std::fmt;
use thiserror::Error;

use crate::token::{Pos, Segment};

#[derive(Error, Debug)]
pub enum Error {
    // Lexical
    #[error("unknown token: {0}")]
    UnknownToken(String),

    #[error("invalid floating point number: `{0}`")]
    InvalidFloat(String),

    #[error("invalid integer: `{0}`")]
    InvalidInteger(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unknown directive: `@{0}`")]
    UnknownDirective(String),

    #[error("unknown segment: `{0}`")]
    UnknownSegment(String),

    // Syntax
    #[error("missing {0}")]
    MissingArgument(&'static str),

    #[error("unexpected end of input: `{0}` requires an operand")]
    UnexpectedEof(OpKind),

    #[error("`{op}` expects {expected}, found {found}")]
    OperandMismatch {
        op: OpKind,
        expected: &'static str,
        found: String,
    },

    #[error("`@import {0}`: imports are not supported")]
    Unsupported(String),

    // Symbol
    #[error("undefined label: `{0}`")]
    UndefinedLabel(String),

    #[error("re-defined label: `{0}` (already defined at line {1})")]
    RedefinedLabel(String, usize),

    #[error("`{0}` is not a data label")]
    NotDataLabel(String),

    #[error("`{0}` is not a code label")]
    NotCodeLabel(String),

    #[error("`{op}` expects {expected} value, but data label `{name}` holds {found} value")]
    LiteralMismatch {
        op: OpKind,
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    // Segment
    #[error("expected segment before {0}")]
    ExpectedSegment(String),

    #[error("data labels can only hold a value")]
    DataLabelValue,

    #[error("{found} is not allowed in the {segment} segment")]
    WrongSegment { found: String, segment: Segment },

    // IO
    #[error("cannot open file '{0}': {1}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("cannot write file '{0}': {1}")]
    FileWrite(String, #[source] std::io::Error),

    #[error("input file is empty '{0}'")]
    EmptySource(String),

    #[error(transparent)]
    Container(#[from] binary::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        use Error::*;
        match self {
            UnknownToken(_) | InvalidFloat(_) | InvalidInteger(_) | UnterminatedString
            | UnknownDirective(_) | UnknownSegment(_) => ErrorKind::Lexical,
            MissingArgument(_) | UnexpectedEof(_) | OperandMismatch { .. } | Unsupported(_) => {
                ErrorKind::Syntax
            }
            UndefinedLabel(_) | RedefinedLabel(..) | NotDataLabel(_) | NotCodeLabel(_)
            | LiteralMismatch { .. } => ErrorKind::Symbol,
            ExpectedSegment(_) | DataLabelValue | WrongSegment { .. } => ErrorKind::Segment,
            FileOpen(..) | FileWrite(..) | EmptySource(_) | Container(_) => ErrorKind::Io,
        }
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Error::EmptySource(_))
    }
}

/// An error together with the place it was reported at.
#[derive(Debug)]
pub struct Diag {
    pub file: String,
    pub line: Option<usize>,
    pub error: Error,
}

impl Diag {
    pub fn at(pos: &Pos, error: Error) -> Self {
        Diag {
            file: pos.file.to_string(),
            line: Some(pos.line),
            error,
        }
    }

    pub fn file(file: &str, error: Error) -> Self {
        Diag {
            file: file.to_string(),
            line: None,
            error,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }

    /// `file:line: ERROR: message`, with the level coloured
    pub fn header(&self) -> String {
        let level = match self.error.is_warning() {
            true => cformat!("<yellow,bold>WARNING</>"),
            false => cformat!("<red,bold>ERROR</>"),
        };
        match self.line {
            Some(line) => cformat!("<underline>{}:{}</>: {}: {}", self.file, line, level, self.error),
            None => format!("{}: {}", level, self.error),
        }
    }

    /// Print the diagnostic to stderr, quoting the offending source line
    pub fn print(&self, source: Option<&str>) {
        eprintln!("{}", self.header());

        let (Some(line), Some(source)) = (self.line, source) else {
            return;
        };
        let content = source.lines().nth(line.saturating_sub(1)).unwrap_or("");
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", line, content);
        ceprintln!("      <blue>|</>");
    }
}

impl fmt::Display for Diag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: ERROR: {}", self.file, line, self.error),
            None => write!(f, "{}: ERROR: {}", self.file, self.error),
        }
    }
}

impl std::error::Error for Diag {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_level() {
        let warning = Diag::file("main.pyasm", Error::EmptySource("main.pyasm".to_string()));
        assert!(warning.header().contains(&cformat!("<yellow,bold>WARNING</>")));

        let pos = Pos {
            file: "main.pyasm",
            line: 3,
        };
        let error = Diag::at(&pos, Error::UnterminatedString);
        assert!(error.header().contains(&cformat!("<red,bold>ERROR</>")));
        assert_eq!(error.to_string(), "main.pyasm:3: ERROR: unterminated string literal");
    }
}
