//! Term construction from text
//!
//! A small recursive-descent reader for the Prolog-like term syntax used to
//! seed buffers and write message payloads. No operators: `f(a, b)` only.

use thiserror::Error;

use super::Term;

/// Error raised when text does not describe a single well-formed term
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Term syntax error at byte {position}: {message}")]
pub struct TermParseError {
    /// Byte offset into the input
    pub position: usize,
    pub message: String,
}

/// Result type for term parsing
pub type Result<T> = std::result::Result<T, TermParseError>;

pub(crate) fn parse_term(text: &str) -> Result<Term> {
    let mut parser = Parser { src: text, pos: 0 };
    parser.skip_ws();
    if parser.at_end() {
        return Ok(Term::Null);
    }
    let term = parser.term()?;
    parser.skip_ws();
    if !parser.at_end() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(term)
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn error(&self, message: impl Into<String>) -> TermParseError {
        TermParseError {
            position: self.pos,
            message: message.into(),
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char) -> Result<()> {
        self.skip_ws();
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", want, c))),
            None => Err(self.error(format!("expected '{}', found end of input", want))),
        }
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let src = self.src;
        let start = self.pos;
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.bump();
        }
        &src[start..self.pos]
    }

    fn term(&mut self) -> Result<Term> {
        self.skip_ws();
        match self.peek() {
            None => Err(self.error("expected a term, found end of input")),
            Some('[') => self.list(),
            Some('\'') => {
                let name = self.quoted('\'')?;
                self.maybe_compound(name)
            }
            Some('"') => Ok(Term::Atom(self.quoted('"')?)),
            Some(c) if c.is_ascii_digit() => self.number(),
            Some('-') if self.src[self.pos + 1..].starts_with(|c: char| c.is_ascii_digit()) => {
                self.number()
            }
            Some(c) if c.is_ascii_uppercase() || c == '_' => {
                let name = self.take_while(|c| c.is_alphanumeric() || c == '_');
                Ok(Term::Var(name.to_string()))
            }
            Some(c) if c.is_alphabetic() => {
                let name = self
                    .take_while(|c| c.is_alphanumeric() || c == '_')
                    .to_string();
                self.maybe_compound(name)
            }
            Some(c) => Err(self.error(format!("unexpected character '{}'", c))),
        }
    }

    fn maybe_compound(&mut self, functor: String) -> Result<Term> {
        if self.peek() != Some('(') {
            return Ok(Term::Atom(functor));
        }
        self.bump();
        let mut args = vec![self.term()?];
        loop {
            self.skip_ws();
            match self.bump() {
                Some(',') => args.push(self.term()?),
                Some(')') => break,
                Some(c) => return Err(self.error(format!("expected ',' or ')', found '{}'", c))),
                None => return Err(self.error("unterminated argument list")),
            }
        }
        Ok(Term::Compound { functor, args })
    }

    fn list(&mut self) -> Result<Term> {
        self.expect('[')?;
        self.skip_ws();
        if self.peek() == Some(']') {
            self.bump();
            return Ok(Term::EmptyList);
        }
        let mut items = vec![self.term()?];
        let mut tail = Term::EmptyList;
        loop {
            self.skip_ws();
            match self.bump() {
                Some(',') => items.push(self.term()?),
                Some('|') => {
                    tail = self.term()?;
                    self.expect(']')?;
                    break;
                }
                Some(']') => break,
                Some(c) => return Err(self.error(format!("expected ',', '|' or ']', found '{}'", c))),
                None => return Err(self.error("unterminated list")),
            }
        }
        Ok(Term::list_with_tail(items, tail))
    }

    fn quoted(&mut self, quote: char) -> Result<String> {
        self.bump();
        let mut out = String::new();
        loop {
            match self.bump() {
                None => return Err(self.error("unterminated quoted text")),
                Some('\\') => match self.bump() {
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some(c) => out.push(c),
                    None => return Err(self.error("dangling escape")),
                },
                Some(c) if c == quote => return Ok(out),
                Some(c) => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Result<Term> {
        let start = self.pos;
        if self.peek() == Some('-') {
            self.bump();
        }
        self.take_while(|c| c.is_ascii_digit());

        let mut real = false;
        let rest = &self.src[self.pos..];
        if rest.starts_with('.') && rest[1..].starts_with(|c: char| c.is_ascii_digit()) {
            real = true;
            self.bump();
            self.take_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            let save = self.pos;
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if self.take_while(|c| c.is_ascii_digit()).is_empty() {
                self.pos = save;
            } else {
                real = true;
            }
        }

        let text = &self.src[start..self.pos];
        if real {
            text.parse::<f64>()
                .map(Term::Real)
                .map_err(|e| self.error(format!("bad real '{}': {}", text, e)))
        } else {
            text.parse::<i64>()
                .map(Term::Int)
                .map_err(|e| self.error(format!("bad integer '{}': {}", text, e)))
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
