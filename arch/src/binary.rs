//! On-disk container of an assembled program.
//!
//! ```text
//! [6 bytes "PYRITE"][1 byte version][4 bytes i32 LE length L][L bytes program]
//! ```

use thiserror::Error;

pub const MAGIC: &[u8; 6] = b"PYRITE";
pub const VERSION: u8 = 1;
pub const HEADER_SIZE: usize = MAGIC.len() + 1 + 4;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("not a valid pyrite file")]
    BadMagic,

    #[error("unsupported format version {found} (expected {expected})")]
    UnsupportedVersion { found: u8, expected: u8 },

    #[error("invalid program length {0}")]
    NegativeLength(i32),

    #[error("truncated file: expected {expected} bytes, found {found}")]
    Truncated { expected: usize, found: usize },

    #[error("program of {0} bytes does not fit the container")]
    TooLarge(usize),
}

pub fn encode(program: &[u8]) -> Result<Vec<u8>, Error> {
    let len = i32::try_from(program.len()).map_err(|_| Error::TooLarge(program.len()))?;
    let mut bin = Vec::with_capacity(HEADER_SIZE + program.len());
    bin.extend_from_slice(MAGIC);
    bin.push(VERSION);
    bin.extend_from_slice(&len.to_le_bytes());
    bin.extend_from_slice(program);
    Ok(bin)
}

/// Returns the program body. The magic tag is checked before anything else
/// is read. Bytes after the declared body are ignored.
pub fn decode(bin: &[u8]) -> Result<&[u8], Error> {
    if !bin.starts_with(MAGIC) {
        return Err(Error::BadMagic);
    }
    let header = bin.get(..HEADER_SIZE).ok_or(Error::Truncated {
        expected: HEADER_SIZE,
        found: bin.len(),
    })?;

    let version = header[MAGIC.len()];
    if version != VERSION {
        return Err(Error::UnsupportedVersion {
            found: version,
            expected: VERSION,
        });
    }

    let mut len = [0u8; 4];
    len.copy_from_slice(&header[MAGIC.len() + 1..]);
    let len = i32::from_le_bytes(len);
    let len = usize::try_from(len).map_err(|_| Error::NegativeLength(len))?;

    bin.get(HEADER_SIZE..HEADER_SIZE + len).ok_or(Error::Truncated {
        expected: HEADER_SIZE + len,
        found: bin.len(),
    })
}
