use color_print::cformat;
use std::io::{self, Write};

use super::Hook;
use crate::model::{Exec, State};

/// Writes every executed instruction as `[time] addr: inst depth`.
pub struct Trace<W: Write> {
    out: W,
}

impl<W: Write> Trace<W> {
    pub fn new(out: W) -> Self {
        Trace { out }
    }
}

impl<W: Write> Hook for Trace<W> {
    fn init(&mut self, state: &State) -> io::Result<()> {
        writeln!(self.out, " * Trace: {} bytes", state.program().len())
    }

    fn exec(&mut self, time: u64, exec: &Exec, state: &State) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {}: {:<24} {}",
            cformat!("<dim>[{:0>4}]</>", time),
            cformat!("<g>{:04X}</>", exec.addr),
            exec.inst.cformat(),
            cformat!("<dim>depth {}</>", state.stack().len())
        )
    }

    fn finish(&mut self, state: &State) -> io::Result<()> {
        writeln!(self.out, " * Trace: stopped at {:04X}", state.pc())?;
        self.out.flush()
    }
}
