use arch::inst::{Inst, OPERAND_SIZE};
use arch::op::OpKind;
use arch::word::Word;

use crate::error::{Diag, Error};
use crate::label::{Label, Labels, Literal};
use crate::token::{Segment, Token, TokenKind};

/// Result of a successful assembly.
#[derive(Debug)]
pub struct Assembled {
    pub program: Vec<u8>,
    pub labels: Labels,
    /// (address, source line) of every emitted instruction
    pub origins: Vec<(usize, usize)>,
}

/// Two-pass assembly: collect every label, then resolve and emit.
pub fn assemble(tokens: &[Token]) -> Result<Assembled, Diag> {
    let labels = collect_labels(tokens)?;
    let mut generator = Generator {
        tokens: tokens.iter(),
        segment: Segment::default(),
        labels,
        program: vec![],
        origins: vec![],
        fixups: vec![],
    };
    generator.run()?;
    generator.patch()?;
    Ok(Assembled {
        program: generator.program,
        labels: generator.labels,
        origins: generator.origins,
    })
}

/// Pass 1: register every label as an unresolved code label.
pub fn collect_labels(tokens: &[Token]) -> Result<Labels, Diag> {
    let mut labels = Labels::new();
    for token in tokens {
        if let TokenKind::Label(name) = token.kind {
            if let Some(prev) = labels.insert(name, token.pos.line) {
                return Err(Diag::at(
                    &token.pos,
                    Error::RedefinedLabel(name.to_string(), prev),
                ));
            }
        }
    }
    Ok(labels)
}

// ----------------------------------------------------------------------------
// Pass 2

struct Generator<'t, 'a> {
    tokens: std::slice::Iter<'t, Token<'a>>,
    segment: Segment,
    labels: Labels,
    program: Vec<u8>,
    origins: Vec<(usize, usize)>,
    // label operands waiting for the end of pass two
    fixups: Vec<(usize, OpKind, &'t Token<'a>)>,
}

impl<'t, 'a> Generator<'t, 'a> {
    fn pc(&self) -> usize {
        self.program.len()
    }

    fn run(&mut self) -> Result<(), Diag> {
        while let Some(token) = self.tokens.next() {
            match token.kind {
                TokenKind::Segment(segment) => self.segment = segment,
                TokenKind::Import(module) => {
                    return Err(Diag::at(&token.pos, Error::Unsupported(module.to_string())))
                }
                _ => match self.segment {
                    Segment::Unknown => {
                        return Err(Diag::at(
                            &token.pos,
                            Error::ExpectedSegment(token.kind.to_string()),
                        ))
                    }
                    Segment::ReadOnly => self.data(token)?,
                    Segment::Code => self.code(token)?,
                },
            }
        }
        Ok(())
    }

    /// `name: <literal>`
    fn data(&mut self, token: &'t Token<'a>) -> Result<(), Diag> {
        let TokenKind::Label(name) = token.kind else {
            return Err(self.wrong_segment(token));
        };
        self.labels.set_pc(name, self.pc());

        let value = self
            .tokens
            .next()
            .ok_or_else(|| Diag::at(&token.pos, Error::DataLabelValue))?;
        match Literal::from_token(&value.kind).map_err(|e| Diag::at(&value.pos, e))? {
            Some(literal) => {
                self.labels.set_data(name, literal);
                Ok(())
            }
            None => Err(Diag::at(&value.pos, Error::DataLabelValue)),
        }
    }

    fn code(&mut self, token: &'t Token<'a>) -> Result<(), Diag> {
        match token.kind {
            TokenKind::Label(name) => {
                self.labels.set_pc(name, self.pc());
                Ok(())
            }
            TokenKind::Inst(op) => self.inst(token, op),
            _ => Err(self.wrong_segment(token)),
        }
    }

    fn inst(&mut self, token: &'t Token<'a>, op: OpKind) -> Result<(), Diag> {
        let inst = match op {
            OpKind::IPUSH => Inst::IPUSH(self.int_operand(token, op)?),
            OpKind::DPUSH => Inst::DPUSH(self.double_operand(token, op)?),
            OpKind::PPUSH => Inst::PPUSH(self.pointer_operand(token, op)?),
            OpKind::HALT => Inst::HALT(),
            OpKind::POP => Inst::POP(),
            OpKind::PRINT => Inst::PRINT(),
            OpKind::IADD => Inst::IADD(),
            OpKind::ISUB => Inst::ISUB(),
            OpKind::IMUL => Inst::IMUL(),
            OpKind::IDIV => Inst::IDIV(),
            OpKind::DADD => Inst::DADD(),
            OpKind::DSUB => Inst::DSUB(),
            OpKind::DMUL => Inst::DMUL(),
            OpKind::DDIV => Inst::DDIV(),
        };
        self.origins.push((self.pc(), token.pos.line));
        inst.encode(&mut self.program);
        Ok(())
    }

    fn operand(&mut self, token: &'t Token<'a>, op: OpKind) -> Result<&'t Token<'a>, Diag> {
        self.tokens
            .next()
            .ok_or_else(|| Diag::at(&token.pos, Error::UnexpectedEof(op)))
    }

    /// Identifier operands are patched once every label is known.
    fn reference(&mut self, arg: &'t Token<'a>, op: OpKind, name: &str) -> Result<(), Diag> {
        if self.labels.get(name).is_none() {
            return Err(Diag::at(&arg.pos, Error::UndefinedLabel(name.to_string())));
        }
        // opcode byte comes first
        self.fixups.push((self.pc() + 1, op, arg));
        Ok(())
    }

    fn int_operand(&mut self, token: &'t Token<'a>, op: OpKind) -> Result<i64, Diag> {
        let arg = self.operand(token, op)?;
        let expected = "an int literal or data label";
        match arg.kind {
            TokenKind::Ident(name) => self.reference(arg, op, name).map(|_| 0),
            TokenKind::Int(_) => match Literal::from_token(&arg.kind).map_err(|e| Diag::at(&arg.pos, e))? {
                Some(Literal::Int(v)) => Ok(v),
                _ => Err(mismatch(arg, op, expected)),
            },
            _ => Err(mismatch(arg, op, expected)),
        }
    }

    fn double_operand(&mut self, token: &'t Token<'a>, op: OpKind) -> Result<f64, Diag> {
        let arg = self.operand(token, op)?;
        let expected = "a double literal or data label";
        match arg.kind {
            TokenKind::Ident(name) => self.reference(arg, op, name).map(|_| 0.0),
            TokenKind::Double(_) => match Literal::from_token(&arg.kind).map_err(|e| Diag::at(&arg.pos, e))? {
                Some(Literal::Double(v)) => Ok(v),
                _ => Err(mismatch(arg, op, expected)),
            },
            _ => Err(mismatch(arg, op, expected)),
        }
    }

    fn pointer_operand(&mut self, token: &'t Token<'a>, op: OpKind) -> Result<u64, Diag> {
        let arg = self.operand(token, op)?;
        match arg.kind {
            TokenKind::Ident(name) => self.reference(arg, op, name).map(|_| 0),
            _ => Err(mismatch(arg, op, "a code label")),
        }
    }

    fn patch(&mut self) -> Result<(), Diag> {
        for (at, op, arg) in &self.fixups {
            let TokenKind::Ident(name) = arg.kind else {
                continue;
            };
            let word = resolve(&self.labels, *op, arg, name)?;
            self.program[*at..*at + OPERAND_SIZE].copy_from_slice(&word.to_le_bytes());
        }
        Ok(())
    }

    fn wrong_segment(&self, token: &Token) -> Diag {
        Diag::at(
            &token.pos,
            Error::WrongSegment {
                found: token.kind.to_string(),
                segment: self.segment,
            },
        )
    }
}

fn mismatch(arg: &Token, op: OpKind, expected: &'static str) -> Diag {
    Diag::at(
        &arg.pos,
        Error::OperandMismatch {
            op,
            expected,
            found: arg.kind.to_string(),
        },
    )
}

/// `ppush` takes the address of a code label, `ipush` and `dpush` the value
/// of a data label of their own type.
fn resolve(labels: &Labels, op: OpKind, arg: &Token, name: &str) -> Result<Word, Diag> {
    let error = |error: Error| -> Result<Word, Diag> { Err(Diag::at(&arg.pos, error)) };
    match (op, labels.get(name)) {
        (_, None) | (OpKind::PPUSH, Some(Label::Code(None))) => {
            error(Error::UndefinedLabel(name.to_string()))
        }
        (OpKind::PPUSH, Some(Label::Code(Some(addr)))) => Ok(Word::Pointer(*addr as u64)),
        (OpKind::PPUSH, Some(Label::Data(_))) => error(Error::NotCodeLabel(name.to_string())),
        (_, Some(Label::Code(_))) => error(Error::NotDataLabel(name.to_string())),
        (OpKind::IPUSH, Some(Label::Data(Literal::Int(v)))) => Ok(Word::Int(*v)),
        (OpKind::DPUSH, Some(Label::Data(Literal::Double(v)))) => Ok(Word::Double(*v)),
        (_, Some(Label::Data(literal))) => error(Error::LiteralMismatch {
            op,
            name: name.to_string(),
            expected: match op {
                OpKind::DPUSH => "a double",
                _ => "an int",
            },
            found: literal.type_name(),
        }),
    }
}
