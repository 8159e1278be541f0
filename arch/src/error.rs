use strum::Display;

/// Error taxonomy shared by the assembler and the virtual machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ErrorKind {
    Lexical,
    Syntax,
    Symbol,
    Segment,
    Io,
    Runtime,
}
