use log::trace;
use nom::{
    branch::alt,
    bytes::complete::{take, take_till, take_till1, take_while1},
    character::complete::char,
    combinator::{map, map_opt, recognize, value},
    sequence::pair,
    IResult,
};
use unicode_general_category::{get_general_category, GeneralCategory};

use crate::tokens::{Kind, Token};

/// Starts a comment running to the end of the line.
pub const COMMENT: char = ';';

fn is_blank(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | 0x0b | 0x0c)
}

fn is_delimiter(b: u8) -> bool {
    is_blank(b) || b == b'\n' || b == COMMENT as u8 || Kind::from_punctuation(b).is_some()
}

/// Whitespace other than newlines, or a comment up to (not including) the
/// newline.
fn blank(input: &[u8]) -> IResult<&[u8], &[u8]> {
    alt((
        take_while1(is_blank),
        recognize(pair(char(COMMENT), take_till(|b: u8| b == b'\n'))),
    ))(input)
}

fn end_of_line(input: &[u8]) -> IResult<&[u8], Kind> {
    value(Kind::EndOfLine, char('\n'))(input)
}

fn punctuation(input: &[u8]) -> IResult<&[u8], Kind> {
    map_opt(take(1usize), |b: &[u8]| Kind::from_punctuation(b[0]))(input)
}

/// Everything up to the next delimiter.
fn word(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_till1(is_delimiter)(input)
}

/// A single lexeme. Only words carry text.
fn lexeme(input: &[u8]) -> IResult<&[u8], (Kind, Option<&[u8]>)> {
    alt((
        map(alt((end_of_line, punctuation)), |kind| (kind, None)),
        map(word, |run| (classify(run), Some(run))),
    ))(input)
}

/// Classify a word by its first code point: a lowercase letter (Ll) starts a
/// non-terminal, an uppercase letter (Lu) a terminal. Anything in the rest of
/// the word that isn't a letter (L*), decimal digit (Nd), or underscore makes
/// the whole word unknown.
fn classify(run: &[u8]) -> Kind {
    use GeneralCategory::*;

    let s = match std::str::from_utf8(run) {
        Ok(s) => s,
        Err(_) => return Kind::Unknown,
    };
    let mut chars = s.chars();
    let kind = match chars.next().map(get_general_category) {
        Some(LowercaseLetter) => Kind::NonTerminal,
        Some(UppercaseLetter) => Kind::Terminal,
        _ => return Kind::Unknown,
    };
    let word_char = |c: char| {
        c == '_'
            || matches!(
                get_general_category(c),
                UppercaseLetter
                    | LowercaseLetter
                    | TitlecaseLetter
                    | ModifierLetter
                    | OtherLetter
                    | DecimalNumber
            )
    };
    if chars.all(word_char) {
        kind
    } else {
        Kind::Unknown
    }
}

/// Iterator over the tokens of some input. The last token produced is always
/// a single `EndOfInput`.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    input: &'a [u8],
    offset: usize,
    line: usize,
    line_start: usize,
    id: usize,
    done: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Scanner {
            input,
            offset: 0,
            line: 1,
            line_start: 0,
            id: 0,
            done: false,
        }
    }

    fn rest(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }

    fn advance(&mut self, remaining: &[u8]) {
        self.offset = self.input.len() - remaining.len();
    }

    fn column(&self) -> usize {
        self.offset - self.line_start + 1
    }

    fn emit(&mut self, kind: Kind, text: &[u8], column: usize) -> Token {
        let id = self.id;
        self.id += 1;
        Token::new(kind, text, self.line, column, id)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }

        loop {
            let rest = self.rest();
            let column = self.column();
            if rest.is_empty() {
                self.done = true;
                return Some(self.emit(Kind::EndOfInput, b"", column));
            }

            if let Ok((remaining, _)) = blank(rest) {
                self.advance(remaining);
                continue;
            }

            // Any byte that isn't blank either is a delimiter or starts a
            // word, so this only falls back to make progress.
            let (remaining, (kind, text)) = match lexeme(rest) {
                Ok(lexed) => lexed,
                Err(_) => (&rest[1..], (Kind::Unknown, Some(&rest[..1]))),
            };
            self.advance(remaining);

            if kind == Kind::EndOfLine {
                self.line += 1;
                self.line_start = self.offset;
                continue;
            }

            let token = self.emit(kind, text.unwrap_or_default(), column);
            trace!("scanned {} at {}:{}", token, token.line, token.column);
            return Some(token);
        }
    }
}

/// Scan all of `input`. Never fails; unrecognized input is returned as
/// `Unknown` tokens.
pub fn scan(input: &[u8]) -> Vec<Token> {
    Scanner::new(input).collect()
}
