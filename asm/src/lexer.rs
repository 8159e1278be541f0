use arch::op::OpKind;
use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::{Diag, Error};
use crate::token::{Pos, Segment, Token, TokenKind};

/// Scanner over one source unit. The cursor and the line counter live here
/// and nowhere else.
pub struct Lexer<'a> {
    file: &'a str,
    code: &'a str,
    iter: Peekable<CharIndices<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(file: &'a str, code: &'a str) -> Self {
        Self {
            file,
            code,
            iter: code.char_indices().peekable(),
            line: 1,
        }
    }

    /// Tokenize the whole source, stopping at the first lexical error
    pub fn parse(mut self) -> Result<Vec<Token<'a>>, Diag> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn peek(&mut self) -> Option<char> {
        self.iter.peek().map(|&(_, ch)| ch)
    }

    fn consume(&mut self) -> Option<(usize, char)> {
        let next = self.iter.next();
        if let Some((_, '\n')) = next {
            self.line += 1;
        }
        next
    }

    /// Byte offset of the next unread character
    fn offset(&mut self) -> usize {
        match self.iter.peek() {
            Some(&(idx, _)) => idx,
            None => self.code.len(),
        }
    }

    /// Consume while `cond` holds and return the consumed span
    fn take_while<F: Fn(char) -> bool>(&mut self, cond: F) -> &'a str {
        let code = self.code;
        let start = self.offset();
        while self.peek().is_some_and(&cond) {
            self.consume();
        }
        &code[start..self.offset()]
    }

    fn skip_whitespace(&mut self) {
        loop {
            match self.peek() {
                Some(ch) if ch.is_ascii_whitespace() => {
                    self.consume();
                }
                // Comment
                Some(';') => {
                    self.take_while(|ch| ch != '\n');
                }
                _ => return,
            }
        }
    }

    fn skip_blank(&mut self) {
        self.take_while(|ch| ch == ' ' || ch == '\t');
    }

    fn error(&self, pos: Pos<'a>, error: Error) -> Diag {
        Diag::at(&pos, error)
    }
}

fn is_ident_head(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_tail(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

// ----------------------------------------------------------------------------
// Scanner
// ----------------------------------------------------------------------------

impl<'a> Lexer<'a> {
    fn next_token(&mut self) -> Result<Option<Token<'a>>, Diag> {
        // 0. Skip whitespaces and comments
        self.skip_whitespace();

        let Some(ch0) = self.peek() else {
            return Ok(None);
        };
        let pos = Pos {
            file: self.file,
            line: self.line,
        };

        let kind = if is_ident_head(ch0) {
            // 1. Label, instruction or identifier
            self.parse_word()
        } else if ch0.is_ascii_digit() {
            // 2. Number literal
            self.parse_number(pos)?
        } else if ch0 == '"' {
            // 3. String literal
            self.parse_text(pos)?
        } else if ch0 == '@' {
            // 4. Directive
            self.parse_directive(pos)?
        } else {
            // Error
            let text = self.take_while(|ch| !ch.is_ascii_whitespace());
            return Err(self.error(pos, Error::UnknownToken(text.to_string())));
        };

        Ok(Some(Token::new(kind, pos)))
    }

    fn parse_word(&mut self) -> TokenKind<'a> {
        let word = self.take_while(is_ident_tail);
        if self.peek() == Some(':') {
            self.consume();
            return TokenKind::Label(word);
        }
        match OpKind::parse(word) {
            Ok(op) => TokenKind::Inst(op),
            Err(_) => TokenKind::Ident(word),
        }
    }

    // 42, 4.2
    fn parse_number(&mut self, pos: Pos<'a>) -> Result<TokenKind<'a>, Diag> {
        let code = self.code;
        let start = self.offset();
        self.take_while(|ch| ch.is_ascii_digit());
        if self.peek() != Some('.') {
            return Ok(TokenKind::Int(&code[start..self.offset()]));
        }

        self.consume(); // consume '.'
        let mantissa = self.take_while(|ch| ch.is_ascii_digit());
        let text = &code[start..self.offset()];
        if mantissa.is_empty() {
            return Err(self.error(pos, Error::InvalidFloat(text.to_string())));
        }
        Ok(TokenKind::Double(text))
    }

    // "text" on a single line, no escapes
    fn parse_text(&mut self, pos: Pos<'a>) -> Result<TokenKind<'a>, Diag> {
        self.consume(); // consume opening '"'
        let text = self.take_while(|ch| ch != '"' && ch != '\n');
        match self.peek() {
            Some('"') => {
                self.consume();
                Ok(TokenKind::Text(text))
            }
            _ => Err(self.error(pos, Error::UnterminatedString)),
        }
    }

    // @segment readonly, @segment code, @import name
    fn parse_directive(&mut self, pos: Pos<'a>) -> Result<TokenKind<'a>, Diag> {
        self.consume(); // consume '@'
        let name = self.take_while(is_ident_tail);
        match name {
            "segment" => {
                self.skip_blank();
                match self.take_while(is_ident_tail) {
                    "readonly" => Ok(TokenKind::Segment(Segment::ReadOnly)),
                    "code" => Ok(TokenKind::Segment(Segment::Code)),
                    "" => Err(self.error(pos, Error::MissingArgument("segment name"))),
                    other => Err(self.error(pos, Error::UnknownSegment(other.to_string()))),
                }
            }
            "import" => {
                self.skip_blank();
                match self.take_while(|ch| !ch.is_ascii_whitespace()) {
                    "" => Err(self.error(pos, Error::MissingArgument("module name"))),
                    module => Ok(TokenKind::Import(module)),
                }
            }
            other => Err(self.error(pos, Error::UnknownDirective(other.to_string()))),
        }
    }
}
