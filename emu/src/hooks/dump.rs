use arch::op::OpKind;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};

use super::Hook;
use crate::error::Error;
use crate::model::{Exec, State};

/// Prints the stack after selected instructions.
#[derive(Debug)]
pub struct Dump {
    file: Option<String>,
    all: bool,
    config: Config,
}

/// ```yaml
/// at: [0x0012, 27]   # instruction addresses
/// on: [print, iadd]  # mnemonics
/// ```
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub at: HashSet<usize>,
    pub on: HashSet<OpKind>,
}

impl Dump {
    pub fn new(config: Config, all: bool) -> Self {
        Self {
            file: None,
            all,
            config,
        }
    }

    pub fn arg(file: Option<String>, all: bool) -> Result<Self, Error> {
        let Some(fname) = file else {
            return Ok(Self::new(Config::default(), all));
        };
        let reader = File::open(&fname).map_err(|e| Error::FileOpen(fname.clone(), e))?;
        let config: Config = serde_yaml::from_reader(BufReader::new(reader))
            .map_err(|e| Error::Config(fname.clone(), e))?;
        Ok(Self {
            file: Some(fname),
            all,
            config,
        })
    }

    fn is_dump(&self, exec: &Exec) -> bool {
        self.all || self.config.at.contains(&exec.addr) || self.config.on.contains(&exec.inst.kind())
    }
}

impl Hook for Dump {
    fn init(&mut self, _state: &State) -> io::Result<()> {
        if self.all {
            eprintln!(" * Dump all");
        }
        if let Some(fname) = &self.file {
            eprintln!(
                " * Dump[{}] {:?}",
                self.config.at.len() + self.config.on.len(),
                fname
            );
        }
        Ok(())
    }

    fn exec(&mut self, time: u64, exec: &Exec, state: &State) -> io::Result<()> {
        if self.is_dump(exec) {
            self.print_stack(time, exec, state);
        }
        Ok(())
    }
}

impl Dump {
    fn print_stack(&self, time: u64, exec: &Exec, state: &State) {
        let stack = state.stack();
        let head = format!("[{:0>4}] {:04X} {}", time, exec.addr, exec.inst.kind());
        eprintln!(" +-{:-<40}-+", head);
        eprintln!(
            " | bp: {:04X}  sp: {:04X}  pc: {:04X}{:15} |",
            state.base_pointer(),
            stack.len(),
            state.pc(),
            ""
        );
        for (idx, word) in stack.iter().enumerate().rev() {
            let value = format!("{:<7} {}", word.ty(), word);
            eprintln!(" | {:04X} : {:<33} |", idx, value);
        }
        eprintln!(" +-{:-<40}-+", "");
    }
}
