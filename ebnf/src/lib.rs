//! Reading and checking grammars written in a small EBNF dialect.
//!
//! The dialect describes itself as:
//!
//! ```text
//! grammar     = production { production } .
//! production  = NONTERMINAL EQ [ expression ] TERMINATOR .
//! expression  = sequence { OR sequence } .
//! sequence    = term { term } .
//! term        = NONTERMINAL | TERMINAL | group | option | repetition .
//! group       = START_GROUP expression END_GROUP .
//! option      = START_OPTION expression END_OPTION .
//! repetition  = START_REPETITION expression END_REPETITION .
//! ```
//!
//! Identifiers starting with a lowercase letter name productions, identifiers
//! starting with an uppercase letter are terminals. `;` starts a comment that
//! runs to the end of the line.
//!
//! Text goes through [`scan`], [`parse`], then [`verify`]. Neither parsing
//! nor verification stop at the first problem; both return every error found.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

mod error;
mod parser;
mod scanner;
mod tokens;
mod verify;

pub use error::{Error, Errors};
pub use parser::{parse, parse_tokens};
pub use scanner::{scan, Scanner, COMMENT};
pub use tokens::{Kind, Token};
pub use verify::{check, verify};

/// The right hand side of a production.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Expression {
    /// `x | y | z`, never empty.
    Alternative(Vec<Expression>),
    /// `x y z`, never empty.
    Sequence(Vec<Expression>),
    /// Reference to a production.
    Name(Token),
    /// A terminal, never looked up.
    Literal(Token),
    /// `( body )`
    Group { open: Token, body: Box<Expression> },
    /// `[ body ]`
    Option { open: Token, body: Box<Expression> },
    /// `{ body }`
    Repetition { open: Token, body: Box<Expression> },
    /// Stands in for a term that failed to parse.
    Malformed { token: Token, error: Error },
}

impl Expression {
    /// The leftmost token of the expression.
    pub fn first_token(&self) -> Option<&Token> {
        match self {
            Expression::Alternative(list) | Expression::Sequence(list) => {
                list.first().and_then(Expression::first_token)
            }
            Expression::Name(tok) | Expression::Literal(tok) => Some(tok),
            Expression::Group { open, .. }
            | Expression::Option { open, .. }
            | Expression::Repetition { open, .. } => Some(open),
            Expression::Malformed { token, .. } => Some(token),
        }
    }

    /// Sequence index of the leftmost token.
    pub fn pos(&self) -> Option<usize> {
        self.first_token().map(Token::pos)
    }

    pub fn line(&self) -> Option<usize> {
        self.first_token().map(|t| t.line)
    }
}

fn write_list(f: &mut fmt::Formatter, list: &[Expression], sep: &str) -> fmt::Result {
    for (i, expr) in list.iter().enumerate() {
        if i > 0 {
            write!(f, "{}", sep)?;
        }
        write!(f, "{}", expr)?;
    }
    Ok(())
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Alternative(list) => write_list(f, list, " | "),
            Expression::Sequence(list) => write_list(f, list, " "),
            Expression::Name(tok) | Expression::Literal(tok) => write!(f, "{}", tok.as_str()),
            Expression::Group { body, .. } => write!(f, "( {} )", body),
            Expression::Option { body, .. } => write!(f, "[ {} ]", body),
            Expression::Repetition { body, .. } => write!(f, "{{ {} }}", body),
            Expression::Malformed { .. } => write!(f, "<malformed>"),
        }
    }
}

/// A production rule. An empty right hand side (`x = .`) has no expression.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Production {
    pub name: Token,
    pub expression: Option<Expression>,
}

impl Production {
    pub fn name(&self) -> Cow<'_, str> {
        self.name.as_str()
    }

    pub fn pos(&self) -> usize {
        self.name.pos()
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.expression {
            Some(expr) => write!(f, "{} = {} .", self.name.as_str(), expr),
            None => write!(f, "{} = .", self.name.as_str()),
        }
    }
}

/// A set of productions indexed by name.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Grammar {
    pub productions: BTreeMap<String, Production>,
}

impl Grammar {
    pub fn get(&self, name: &str) -> Option<&Production> {
        self.productions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.productions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Productions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &Production> {
        self.productions.values()
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for production in self.iter() {
            writeln!(f, "{}", production)?;
        }
        Ok(())
    }
}

impl FromStr for Grammar {
    type Err = Errors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (grammar, errors) = parse(s.as_bytes());
        Errors::into_result(errors)?;
        Ok(grammar)
    }
}
