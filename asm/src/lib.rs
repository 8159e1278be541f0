pub mod codegen;
pub mod error;
pub mod label;
pub mod lexer;
pub mod token;
pub mod util;

pub use codegen::{assemble, Assembled};
pub use error::{Diag, Error};
pub use lexer::Lexer;

/// Assemble one source unit and wrap the program in its container.
pub fn build(file: &str, source: &str) -> Result<(Assembled, Vec<u8>), Diag> {
    if source.is_empty() {
        return Err(Diag::file(file, Error::EmptySource(file.to_string())));
    }
    let tokens = Lexer::new(file, source).parse()?;
    let assembled = assemble(&tokens)?;
    let bin = arch::binary::encode(&assembled.program).map_err(|e| Diag::file(file, e.into()))?;
    Ok((assembled, bin))
}
