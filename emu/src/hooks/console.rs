use std::io::{self, Write};

use super::Hook;
use crate::model::{Exec, State};

/// Writes every printed word to `out`, one per line.
pub struct Console<W: Write> {
    out: W,
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Console { out }
    }
}

impl<W: Write> Hook for Console<W> {
    fn exec(&mut self, _time: u64, exec: &Exec, _state: &State) -> io::Result<()> {
        if let Some(word) = exec.output {
            writeln!(self.out, "{}", word)?;
        }
        Ok(())
    }

    fn finish(&mut self, _state: &State) -> io::Result<()> {
        self.out.flush()
    }
}
