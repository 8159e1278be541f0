pub mod alu;
pub mod binary;
pub mod error;
pub mod inst;
pub mod op;
pub mod word;

pub use error::ErrorKind;
