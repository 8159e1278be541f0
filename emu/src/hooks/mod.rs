pub mod console;
pub mod dump;
pub mod trace;

use std::io;

use crate::model::{Exec, State};

/// Side effects attached to the execution loop.
pub trait Hook {
    fn init(&mut self, _state: &State) -> io::Result<()> {
        Ok(())
    }
    fn exec(&mut self, time: u64, exec: &Exec, state: &State) -> io::Result<()>;
    fn finish(&mut self, _state: &State) -> io::Result<()> {
        Ok(())
    }
}
