use arch::op::OpKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind<'a>,
    pub pos: Pos<'a>,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind<'a>, pos: Pos<'a>) -> Self {
        Token { kind, pos }
    }
}

/// Text payloads borrow from the source buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind<'a> {
    Inst(OpKind),      // ipush
    Label(&'a str),    // name:
    Ident(&'a str),    // name
    Int(&'a str),      // 42
    Double(&'a str),   // 4.2
    Text(&'a str),     // "text"
    Segment(Segment),  // @segment code
    Import(&'a str),   // @import name
}

impl fmt::Display for TokenKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Inst(op) => write!(f, "instruction `{}`", op),
            TokenKind::Label(name) => write!(f, "label `{}:`", name),
            TokenKind::Ident(name) => write!(f, "identifier `{}`", name),
            TokenKind::Int(text) => write!(f, "int literal `{}`", text),
            TokenKind::Double(text) => write!(f, "double literal `{}`", text),
            TokenKind::Text(text) => write!(f, "string literal \"{}\"", text),
            TokenKind::Segment(seg) => write!(f, "`@segment {}`", seg),
            TokenKind::Import(name) => write!(f, "`@import {}`", name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Segment {
    #[default]
    Unknown,
    ReadOnly,
    Code,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Unknown => write!(f, "unknown"),
            Segment::ReadOnly => write!(f, "readonly"),
            Segment::Code => write!(f, "code"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pos<'a> {
    pub file: &'a str,
    pub line: usize,
}
