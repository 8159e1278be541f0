use arch::alu::{dalu, ialu};
use arch::binary;
use arch::inst::Inst;
use arch::word::{Word, WordType};

use crate::error::{Error, Fault};

/// Capacity of the operand stack, in words.
pub const STACK_SIZE: usize = 2048;

pub struct State {
    program: Vec<u8>,
    // byte offset of the next instruction
    pc: usize,
    stack: Vec<Word>,
    // reserved for call frames
    base_pointer: usize,
    halted: bool,
}

/// One executed instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct Exec {
    pub addr: usize,
    pub inst: Inst,
    /// Word emitted by `print`
    pub output: Option<Word>,
}

impl State {
    pub fn new(program: Vec<u8>) -> Self {
        State {
            program,
            pc: 0,
            stack: Vec::with_capacity(STACK_SIZE),
            base_pointer: 0,
            halted: false,
        }
    }

    /// Unwraps a container image.
    pub fn load(bin: &[u8]) -> Result<Self, binary::Error> {
        Ok(State::new(binary::decode(bin)?.to_vec()))
    }

    pub fn load_file(path: &str) -> Result<Self, Error> {
        let bin = std::fs::read(path).map_err(|e| Error::FileOpen(path.to_string(), e))?;
        State::load(&bin).map_err(|e| Error::Format(path.to_string(), e))
    }

    pub fn program(&self) -> &[u8] {
        &self.program
    }

    pub fn pc(&self) -> usize {
        self.pc
    }

    /// Bottom first.
    pub fn stack(&self) -> &[Word] {
        &self.stack
    }

    pub fn base_pointer(&self) -> usize {
        self.base_pointer
    }

    /// Stopped by `halt` or by running off the end of the program.
    pub fn is_terminated(&self) -> bool {
        self.halted || self.pc >= self.program.len()
    }
}

// Stack access
impl State {
    fn push(&mut self, addr: usize, word: Word) -> Result<(), Fault> {
        if self.stack.len() >= STACK_SIZE {
            return Err(Fault::StackOverflow {
                addr,
                capacity: STACK_SIZE,
            });
        }
        self.stack.push(word);
        Ok(())
    }

    fn pop(&mut self, addr: usize, inst: &Inst) -> Result<Word, Fault> {
        self.stack.pop().ok_or(Fault::StackUnderflow {
            addr,
            op: inst.kind(),
        })
    }
}

impl State {
    /// Fetch, decode and execute the instruction at the program counter.
    pub fn exec(&mut self) -> Result<Exec, Fault> {
        let addr = self.pc;
        let inst = Inst::decode(&self.program, addr)?;
        self.pc += inst.size();

        let mut output = None;
        match &inst {
            Inst::HALT() => self.halted = true,
            Inst::IPUSH(v) => self.push(addr, Word::Int(*v))?,
            Inst::DPUSH(v) => self.push(addr, Word::Double(*v))?,
            Inst::PPUSH(v) => self.push(addr, Word::Pointer(*v))?,
            Inst::POP() => {
                self.pop(addr, &inst)?;
            }
            Inst::PRINT() => output = Some(self.pop(addr, &inst)?),
            Inst::IADD()
            | Inst::ISUB()
            | Inst::IMUL()
            | Inst::IDIV()
            | Inst::DADD()
            | Inst::DSUB()
            | Inst::DMUL()
            | Inst::DDIV() => self.calc(addr, &inst)?,
        }

        Ok(Exec { addr, inst, output })
    }

    // rhs is on top
    fn calc(&mut self, addr: usize, inst: &Inst) -> Result<(), Fault> {
        let op = inst.kind();
        let Some((ty, alu)) = op.alu() else {
            return Ok(());
        };
        let rhs = self.pop(addr, inst)?;
        let lhs = self.pop(addr, inst)?;

        let result = match (lhs, rhs) {
            (Word::Int(a), Word::Int(b)) if ty == WordType::Int => {
                Word::Int(ialu(alu, a, b).ok_or(Fault::DivisionByZero { addr })?)
            }
            (Word::Double(a), Word::Double(b)) if ty == WordType::Double => {
                Word::Double(dalu(alu, a, b))
            }
            _ => {
                let found = match lhs.ty() == ty {
                    true => rhs.ty(),
                    false => lhs.ty(),
                };
                return Err(Fault::TypeMismatch {
                    addr,
                    op,
                    expected: ty,
                    found,
                });
            }
        };
        self.push(addr, result)
    }
}
