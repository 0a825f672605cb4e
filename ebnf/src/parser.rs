use log::debug;

use crate::error::{describe, Error};
use crate::scanner::scan;
use crate::tokens::{Kind, Token};
use crate::{Expression, Grammar, Production};

/// Parse a set of productions from `input`.
///
/// Errors are reported for incorrect syntax and for productions declared more
/// than once. Parsing continues past errors, so the returned grammar holds
/// whatever could be read even when the error list is not empty.
pub fn parse(input: &[u8]) -> (Grammar, Vec<Error>) {
    parse_tokens(scan(input))
}

/// Parse an already scanned token sequence.
///
/// Parsing stops at the first `EndOfInput` token; one is assumed at the end
/// if the sequence has none.
pub fn parse_tokens(tokens: Vec<Token>) -> (Grammar, Vec<Error>) {
    let mut p = Parser::new(tokens);
    let grammar = p.grammar();
    debug!(
        "parsed {} productions with {} errors",
        grammar.len(),
        p.errors.len()
    );
    (grammar, p.errors)
}

struct Parser {
    tokens: Vec<Token>,
    /// Current token.
    pos: usize,
    /// Index of the end of input token. `pos` never moves past it.
    end: usize,
    errors: Vec<Error>,
}

impl Parser {
    fn new(mut tokens: Vec<Token>) -> Self {
        let end = match tokens.iter().position(Token::is_eof) {
            Some(end) => end,
            None => {
                let (line, column) = tokens
                    .last()
                    .map(|t| (t.line, t.column + t.text.len().max(1)))
                    .unwrap_or((1, 1));
                let id = tokens.len();
                tokens.push(Token::new(Kind::EndOfInput, "", line, column, id));
                id
            }
        };
        Parser {
            tokens,
            pos: 0,
            end,
            errors: Vec::new(),
        }
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn kind(&self) -> Kind {
        self.current().kind
    }

    /// Return the current token and move to the next one.
    fn next(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos < self.end {
            self.pos += 1;
        }
        tok
    }

    /// Consume the current token, recording an error if it isn't `kind`.
    fn expect(&mut self, kind: Kind) -> Token {
        if self.kind() != kind {
            let err = Error::unexpected(kind, self.current());
            self.errors.push(err);
        }
        self.next()
    }

    // grammar = production { production } .
    fn grammar(&mut self) -> Grammar {
        let mut grammar = Grammar::default();

        while !self.current().is_eof() {
            let production = self.production();
            if production.name.kind != Kind::NonTerminal {
                // Already reported by `expect`.
                continue;
            }

            let name = production.name.as_str().into_owned();
            if let Some(previous) = grammar.get(&name) {
                self.errors.push(Error::DuplicateProduction {
                    line: production.name.line,
                    previous_line: previous.name.line,
                    name,
                });
                continue;
            }

            debug!("production {} at line {}", name, production.name.line);
            grammar.productions.insert(name, production);
        }

        let trailing = &self.tokens[self.end + 1..];
        if let Some(first) = trailing.first() {
            self.errors.push(Error::TrailingTokens {
                line: first.line,
                column: first.column,
                count: trailing.len(),
                found: describe(first),
            });
        }

        grammar
    }

    // production = NONTERMINAL EQ [ expression ] TERMINATOR .
    fn production(&mut self) -> Production {
        let name = self.expect(Kind::NonTerminal);
        self.expect(Kind::Equals);
        let expression = if self.kind() != Kind::Terminator {
            Some(self.expression())
        } else {
            None
        };
        self.expect(Kind::Terminator);
        Production { name, expression }
    }

    // expression = sequence { OR sequence } .
    fn expression(&mut self) -> Expression {
        let mut list = vec![self.sequence()];
        while self.kind() == Kind::Or {
            self.next();
            list.push(self.sequence());
        }
        collapse(list, Expression::Alternative)
    }

    // sequence = term { term } .
    fn sequence(&mut self) -> Expression {
        let mut list = Vec::new();
        while let Some(term) = self.term() {
            list.push(term);
        }

        if list.is_empty() {
            let token = self.current().clone();
            let error = Error::empty_sequence(&token);
            self.errors.push(error.clone());
            return Expression::Malformed { token, error };
        }

        collapse(list, Expression::Sequence)
    }

    // term = NONTERMINAL | TERMINAL | group | option | repetition .
    //
    // Returns `None` without consuming anything if no term starts here.
    fn term(&mut self) -> Option<Expression> {
        let term = match self.kind() {
            Kind::NonTerminal => Expression::Name(self.next()),
            Kind::Terminal => Expression::Literal(self.next()),
            Kind::StartGroup => {
                let (open, body) = self.enclosed(Kind::EndGroup);
                Expression::Group { open, body }
            }
            Kind::StartOption => {
                let (open, body) = self.enclosed(Kind::EndOption);
                Expression::Option { open, body }
            }
            Kind::StartRepetition => {
                let (open, body) = self.enclosed(Kind::EndRepetition);
                Expression::Repetition { open, body }
            }
            _ => return None,
        };
        Some(term)
    }

    // open expression close
    fn enclosed(&mut self, close: Kind) -> (Token, Box<Expression>) {
        let open = self.next();
        let body = Box::new(self.expression());
        self.expect(close);
        (open, body)
    }
}

/// Only wrap lists with more than one element.
fn collapse(mut list: Vec<Expression>, wrap: fn(Vec<Expression>) -> Expression) -> Expression {
    if list.len() == 1 {
        list.remove(0)
    } else {
        wrap(list)
    }
}
