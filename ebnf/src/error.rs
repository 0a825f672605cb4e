use std::error;
use std::fmt::{self, Display};
use std::slice;
use std::vec;

use thiserror::Error;

use crate::tokens::Token;

/// A syntax or semantic problem found in a grammar.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("{line}:{column}: expected {expected}, found {found}")]
    Unexpected {
        line: usize,
        column: usize,
        expected: String,
        found: String,
    },

    /// A sequence with no terms, e.g. `x = ( ) .`.
    #[error("{line}:{column}: term expected, found {found}")]
    EmptySequence {
        line: usize,
        column: usize,
        found: String,
    },

    #[error("{line}: {name}: defined line {previous_line}")]
    DuplicateProduction {
        name: String,
        line: usize,
        previous_line: usize,
    },

    /// Tokens left over after the end of input marker.
    #[error("{line}:{column}: {count} unconsumed tokens after end of input, first {found}")]
    TrailingTokens {
        line: usize,
        column: usize,
        count: usize,
        found: String,
    },

    #[error("no start production {name:?}")]
    NoStartProduction { name: String },

    #[error("{line}:{column}: missing production {name:?}")]
    MissingProduction {
        name: String,
        line: usize,
        column: usize,
    },

    #[error("{line}: {name:?} is unreachable")]
    Unreachable { name: String, line: usize },

    #[error("{line}:{column}: reference to non-lexical production {name:?}")]
    NonLexicalReference {
        name: String,
        line: usize,
        column: usize,
    },
}

impl Error {
    pub fn unexpected(expected: impl Display, found: &Token) -> Self {
        Error::Unexpected {
            line: found.line,
            column: found.column,
            expected: expected.to_string(),
            found: describe(found),
        }
    }

    pub fn empty_sequence(found: &Token) -> Self {
        Error::EmptySequence {
            line: found.line,
            column: found.column,
            found: describe(found),
        }
    }

    /// Whether the error comes from reading the grammar rather than checking
    /// it.
    pub fn is_syntax(&self) -> bool {
        matches!(
            self,
            Error::Unexpected { .. }
                | Error::EmptySequence { .. }
                | Error::DuplicateProduction { .. }
                | Error::TrailingTokens { .. }
        )
    }
}

/// Kind and, when present, text of a token.
pub(crate) fn describe(tok: &Token) -> String {
    if tok.text.is_empty() {
        tok.kind.to_string()
    } else {
        format!("{} {:?}", tok.kind, tok.as_str())
    }
}

/// A non-empty list of errors, reported as a single error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Errors(Vec<Error>);

impl Errors {
    /// Wraps the list, returning `None` if there is nothing to report.
    pub fn from_vec(errors: Vec<Error>) -> Option<Errors> {
        if errors.is_empty() {
            None
        } else {
            Some(Errors(errors))
        }
    }

    pub fn into_result(errors: Vec<Error>) -> Result<(), Errors> {
        match Errors::from_vec(errors) {
            Some(errors) => Err(errors),
            None => Ok(()),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; there is no empty `Errors`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, Error> {
        self.0.iter()
    }
}

impl Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "no errors"),
            [only] => write!(f, "{}", only),
            [first, rest @ ..] => write!(f, "{} (and {} more errors)", first, rest.len()),
        }
    }
}

impl error::Error for Errors {}

impl IntoIterator for Errors {
    type Item = Error;
    type IntoIter = vec::IntoIter<Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Errors {
    type Item = &'a Error;
    type IntoIter = slice::Iter<'a, Error>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
