use std::borrow::Cow;
use std::fmt::{self, Display};

/// The class of a scanned lexeme.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    Unknown,
    EndGroup,
    EndOption,
    EndRepetition,
    EndOfInput,
    /// Produced while lexing and consumed by the scanner. Never appears in a
    /// token sequence.
    EndOfLine,
    Equals,
    Or,
    NonTerminal,
    StartGroup,
    StartOption,
    StartRepetition,
    Terminal,
    Terminator,
}

impl Kind {
    /// Map a single punctuation byte to its kind.
    pub fn from_punctuation(b: u8) -> Option<Kind> {
        match b {
            b'=' => Some(Kind::Equals),
            b')' => Some(Kind::EndGroup),
            b']' => Some(Kind::EndOption),
            b'}' => Some(Kind::EndRepetition),
            b'|' => Some(Kind::Or),
            b'(' => Some(Kind::StartGroup),
            b'[' => Some(Kind::StartOption),
            b'{' => Some(Kind::StartRepetition),
            b'.' => Some(Kind::Terminator),
            _ => None,
        }
    }

    /// The source character for punctuation kinds.
    pub fn punctuation(self) -> Option<char> {
        match self {
            Kind::Equals => Some('='),
            Kind::EndGroup => Some(')'),
            Kind::EndOption => Some(']'),
            Kind::EndRepetition => Some('}'),
            Kind::Or => Some('|'),
            Kind::StartGroup => Some('('),
            Kind::StartOption => Some('['),
            Kind::StartRepetition => Some('{'),
            Kind::Terminator => Some('.'),
            _ => None,
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Kind::Unknown => "UNKNOWN",
            Kind::EndGroup => "END_GROUP",
            Kind::EndOption => "END_OPTION",
            Kind::EndRepetition => "END_REPETITION",
            Kind::EndOfInput => "EOF",
            Kind::EndOfLine => "EOL",
            Kind::Equals => "EQ",
            Kind::Or => "OR",
            Kind::NonTerminal => "NON_TERMINAL",
            Kind::StartGroup => "START_GROUP",
            Kind::StartOption => "START_OPTION",
            Kind::StartRepetition => "START_REPETITION",
            Kind::Terminal => "TERMINAL",
            Kind::Terminator => "TERMINATOR",
        };
        write!(f, "{}", name)
    }
}

/// A classified lexeme along with where it was found.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Token {
    pub kind: Kind,
    /// Source bytes of the lexeme, exactly as they appeared in the input.
    /// Empty for punctuation and end of input.
    pub text: Vec<u8>,
    /// 1-based line.
    pub line: usize,
    /// 1-based byte column within the line.
    pub column: usize,
    /// Index of this token in the scanned sequence.
    pub id: usize,
}

impl Token {
    pub fn new(kind: Kind, text: impl Into<Vec<u8>>, line: usize, column: usize, id: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            line,
            column,
            id,
        }
    }

    /// Index of the token in its sequence.
    pub fn pos(&self) -> usize {
        self.id
    }

    /// The lexeme as text. Invalid UTF-8, which only `Unknown` tokens can
    /// hold, is replaced.
    pub fn as_str(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.text)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == Kind::EndOfInput
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            Kind::Unknown => write!(f, "({} {:?})", self.line, self.as_str()),
            Kind::NonTerminal | Kind::Terminal => write!(f, "({} {})", self.line, self.as_str()),
            Kind::EndOfInput => write!(f, "({} $)", self.line),
            Kind::EndOfLine => write!(f, "({} eol)", self.line),
            kind => match kind.punctuation() {
                Some(c) => write!(f, "({} '{}')", self.line, c),
                None => write!(f, "({} {} {:?})", self.line, kind, self.as_str()),
            },
        }
    }
}
