use std::collections::BTreeSet;

use log::debug;

use crate::error::{Error, Errors};
use crate::tokens::Kind;
use crate::{Expression, Grammar, Production};

/// Check that, starting from `start`:
///
///  - all productions used are defined
///  - all productions defined are used
///  - lexical productions refer only to other lexical productions
///
/// Every problem found is returned; an empty list means the grammar is sound.
pub fn verify(grammar: &Grammar, start: &str) -> Vec<Error> {
    let mut v = Verifier::new(grammar);
    v.verify(start);
    debug!(
        "verified {} of {} productions from {:?} with {} errors",
        v.reached.len(),
        grammar.len(),
        start,
        v.errors.len()
    );
    v.errors
}

/// Like `verify`, with all errors folded into one.
pub fn check(grammar: &Grammar, start: &str) -> Result<(), Errors> {
    Errors::into_result(verify(grammar, start))
}

struct Verifier<'g> {
    grammar: &'g Grammar,
    /// Names of productions reached from (and including) the start.
    reached: BTreeSet<&'g str>,
    /// Reached productions whose expressions haven't been walked yet.
    worklist: Vec<&'g Production>,
    errors: Vec<Error>,
}

impl<'g> Verifier<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        Verifier {
            grammar,
            reached: BTreeSet::new(),
            worklist: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn push(&mut self, name: &'g str, production: &'g Production) {
        if self.reached.insert(name) {
            self.worklist.push(production);
        }
    }

    fn verify(&mut self, start: &str) {
        let grammar = self.grammar;
        let (name, root) = match grammar.productions.get_key_value(start) {
            Some(root) => root,
            None => {
                self.errors.push(Error::NoStartProduction {
                    name: start.to_owned(),
                });
                return;
            }
        };

        self.push(name, root);
        while let Some(production) = self.worklist.pop() {
            debug!("visiting {}", production.name());
            let lexical = production.name.kind == Kind::NonTerminal;
            if let Some(expr) = &production.expression {
                self.expression(expr, lexical);
            }
        }

        if self.reached.len() < grammar.len() {
            for (name, production) in &grammar.productions {
                if !self.reached.contains(name.as_str()) {
                    self.errors.push(Error::Unreachable {
                        name: name.clone(),
                        line: production.name.line,
                    });
                }
            }
        }
    }

    fn expression(&mut self, expr: &'g Expression, lexical: bool) {
        match expr {
            Expression::Alternative(list) | Expression::Sequence(list) => {
                for e in list {
                    self.expression(e, lexical);
                }
            }
            Expression::Name(tok) => {
                let grammar = self.grammar;
                match grammar.productions.get_key_value(&*tok.as_str()) {
                    Some((name, production)) => self.push(name, production),
                    None => self.errors.push(Error::MissingProduction {
                        name: tok.as_str().into_owned(),
                        line: tok.line,
                        column: tok.column,
                    }),
                }
                // Names are only ever built from non-terminal tokens, so this
                // never fires for parsed grammars.
                if lexical && tok.kind == Kind::Terminal {
                    self.errors.push(Error::NonLexicalReference {
                        name: tok.as_str().into_owned(),
                        line: tok.line,
                        column: tok.column,
                    });
                }
            }
            Expression::Literal(_) => {}
            Expression::Group { body, .. }
            | Expression::Option { body, .. }
            | Expression::Repetition { body, .. } => self.expression(body, lexical),
            Expression::Malformed { error, .. } => self.errors.push(error.clone()),
        }
    }
}
