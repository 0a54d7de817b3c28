//! Symbolic Terms
//!
//! The value type carried by buffer elements, message payloads and match
//! templates. A term is one of:
//!
//! - **Null**: the absent term, never matches anything
//! - **EmptyList**: `[]`
//! - **Int** / **Real**: numeric leaves
//! - **Atom**: named constant (`foo`, `'Hello world'`)
//! - **Var**: unbound variable (`X`, `_`)
//! - **Compound**: functor plus ordered arguments (`f(a, X)`)
//!
//! Terms are plain owned values: copying is `Clone`, freeing is `Drop`.
//! Lists are written `[a, b | T]` and stored as nested `'.'/2` cells.

mod parse;
mod unify;

pub use parse::{Result, TermParseError};
pub use unify::{matches, unify};

use std::fmt;
use std::str::FromStr;

/// Functor used for list cells (`[H|T]` is `'.'(H, T)`)
pub const LIST_FUNCTOR: &str = ".";

// ============================================================================
// TERM KIND
// ============================================================================

/// Discriminant of a [`Term`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TermKind {
    Null,
    EmptyList,
    Int,
    Real,
    Atom,
    Var,
    Compound,
}

impl TermKind {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TermKind::Null => "null",
            TermKind::EmptyList => "empty_list",
            TermKind::Int => "int",
            TermKind::Real => "real",
            TermKind::Atom => "atom",
            TermKind::Var => "var",
            TermKind::Compound => "compound",
        }
    }
}

impl fmt::Display for TermKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// TERM
// ============================================================================

/// A symbolic term
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Term {
    /// The absent term
    #[default]
    Null,
    /// `[]`
    EmptyList,
    Int(i64),
    Real(f64),
    /// Named constant; quoted atoms and strings both land here
    Atom(String),
    /// Unbound variable, named as written (`_` for anonymous)
    Var(String),
    /// Functor with one or more arguments
    Compound { functor: String, args: Vec<Term> },
}

impl Term {
    /// Parse a term from text
    pub fn parse(text: &str) -> Result<Term> {
        parse::parse_term(text)
    }

    /// Build an atom
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Build a variable
    pub fn var(name: impl Into<String>) -> Self {
        Term::Var(name.into())
    }

    /// Build a compound term. An empty argument list yields an atom.
    pub fn compound(functor: impl Into<String>, args: Vec<Term>) -> Self {
        if args.is_empty() {
            Term::Atom(functor.into())
        } else {
            Term::Compound {
                functor: functor.into(),
                args,
            }
        }
    }

    /// Build a proper list from its items
    pub fn list(items: Vec<Term>) -> Self {
        Self::list_with_tail(items, Term::EmptyList)
    }

    /// Build a list from its items and an explicit tail
    pub fn list_with_tail(items: Vec<Term>, tail: Term) -> Self {
        items.into_iter().rev().fold(tail, |acc, item| Term::Compound {
            functor: LIST_FUNCTOR.to_string(),
            args: vec![item, acc],
        })
    }

    /// Get the kind of this term
    pub fn kind(&self) -> TermKind {
        match self {
            Term::Null => TermKind::Null,
            Term::EmptyList => TermKind::EmptyList,
            Term::Int(_) => TermKind::Int,
            Term::Real(_) => TermKind::Real,
            Term::Atom(_) => TermKind::Atom,
            Term::Var(_) => TermKind::Var,
            Term::Compound { .. } => TermKind::Compound,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Term::Null)
    }

    pub fn is_var(&self) -> bool {
        matches!(self, Term::Var(_))
    }

    /// Functor name: the atom text for atoms, the functor for compounds
    pub fn functor(&self) -> Option<&str> {
        match self {
            Term::Atom(name) => Some(name),
            Term::Compound { functor, .. } => Some(functor),
            _ => None,
        }
    }

    /// Number of arguments (zero for everything but compounds)
    pub fn arity(&self) -> usize {
        match self {
            Term::Compound { args, .. } => args.len(),
            _ => 0,
        }
    }

    /// Argument at 1-based position `i`
    pub fn arg(&self, i: usize) -> Option<&Term> {
        match self {
            Term::Compound { args, .. } if i >= 1 => args.get(i - 1),
            _ => None,
        }
    }

    /// Replace the argument at 1-based position `i`, returning the old one.
    ///
    /// Returns `None` (and leaves the term untouched) when there is no such
    /// argument.
    pub fn set_arg(&mut self, i: usize, value: Term) -> Option<Term> {
        match self {
            Term::Compound { args, .. } if i >= 1 && i <= args.len() => {
                Some(std::mem::replace(&mut args[i - 1], value))
            }
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Term::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Term::Real(x) => Some(*x),
            _ => None,
        }
    }

    /// True when the term contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Compound { args, .. } => args.iter().all(Term::is_ground),
            _ => true,
        }
    }

    /// Exchange the contents of two terms in place
    pub fn swap(&mut self, other: &mut Term) {
        std::mem::swap(self, other);
    }

    fn is_list_cell(&self) -> bool {
        matches!(self, Term::Compound { functor, args } if functor == LIST_FUNCTOR && args.len() == 2)
    }
}

impl FromStr for Term {
    type Err = TermParseError;

    fn from_str(s: &str) -> Result<Self> {
        Term::parse(s)
    }
}

impl From<i64> for Term {
    fn from(n: i64) -> Self {
        Term::Int(n)
    }
}

impl From<f64> for Term {
    fn from(x: f64) -> Self {
        Term::Real(x)
    }
}

// ============================================================================
// DISPLAY
// ============================================================================

/// Atoms that can be printed without quotes
fn is_plain_atom(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => chars.all(|c| c.is_ascii_alphanumeric() || c == '_'),
        _ => false,
    }
}

fn write_atom(f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
    if is_plain_atom(name) {
        f.write_str(name)
    } else {
        f.write_str("'")?;
        for c in name.chars() {
            match c {
                '\'' => f.write_str("\\'")?,
                '\\' => f.write_str("\\\\")?,
                '\n' => f.write_str("\\n")?,
                _ => write!(f, "{}", c)?,
            }
        }
        f.write_str("'")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Null => f.write_str("<null>"),
            Term::EmptyList => f.write_str("[]"),
            Term::Int(n) => write!(f, "{}", n),
            Term::Real(x) => write!(f, "{:?}", x),
            Term::Atom(name) => write_atom(f, name),
            Term::Var(name) => f.write_str(name),
            Term::Compound { .. } if self.is_list_cell() => {
                f.write_str("[")?;
                let mut cell = self;
                let mut first = true;
                loop {
                    match cell {
                        Term::Compound { args, .. } if cell.is_list_cell() => {
                            if !first {
                                f.write_str(", ")?;
                            }
                            write!(f, "{}", args[0])?;
                            first = false;
                            cell = &args[1];
                        }
                        Term::EmptyList => break,
                        tail => {
                            write!(f, "|{}", tail)?;
                            break;
                        }
                    }
                }
                f.write_str("]")
            }
            Term::Compound { functor, args } => {
                write_atom(f, functor)?;
                f.write_str("(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
