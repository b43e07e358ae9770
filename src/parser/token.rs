//! Token definitions shared by the lexer, the `.dyd` codec and the parser
//!
//! Every [`TokenKind`] has a fixed numeric code (1–25) that is the on-disk
//! representation in `.dyd` files. The two end markers ([`TokenKind::Eoln`]
//! and [`TokenKind::Eof`]) are produced by the lexer but never reach the parser.

use std::fmt;

/// Grammatical category of a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenKind {
    // Keywords
    Begin = 1,
    End = 2,
    Integer = 3,
    If = 4,
    Then = 5,
    Else = 6,
    Function = 7,
    Read = 8,
    Write = 9,

    Identifier = 10,
    Constant = 11,

    // Relational operators
    Equal = 12,
    NotEqual = 13,
    LessEqual = 14,
    Less = 15,
    GreaterEqual = 16,
    Greater = 17,

    Subtract = 18,
    Multiply = 19,
    Assign = 20,

    BracketLeft = 21,
    BracketRight = 22,
    Semicolon = 23,

    // End markers
    Eoln = 24,
    Eof = 25,
}

impl TokenKind {
    const ALL: [TokenKind; 25] = [
        TokenKind::Begin,
        TokenKind::End,
        TokenKind::Integer,
        TokenKind::If,
        TokenKind::Then,
        TokenKind::Else,
        TokenKind::Function,
        TokenKind::Read,
        TokenKind::Write,
        TokenKind::Identifier,
        TokenKind::Constant,
        TokenKind::Equal,
        TokenKind::NotEqual,
        TokenKind::LessEqual,
        TokenKind::Less,
        TokenKind::GreaterEqual,
        TokenKind::Greater,
        TokenKind::Subtract,
        TokenKind::Multiply,
        TokenKind::Assign,
        TokenKind::BracketLeft,
        TokenKind::BracketRight,
        TokenKind::Semicolon,
        TokenKind::Eoln,
        TokenKind::Eof,
    ];

    /// Numeric code written to `.dyd` files.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`TokenKind::code`]; `None` outside 1..=25.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.get(usize::from(code).checked_sub(1)?).copied()
    }

    /// Reserved word lookup. Matching is case-sensitive.
    pub fn keyword(word: &str) -> Option<Self> {
        match word {
            "begin" => Some(TokenKind::Begin),
            "end" => Some(TokenKind::End),
            "integer" => Some(TokenKind::Integer),
            "if" => Some(TokenKind::If),
            "then" => Some(TokenKind::Then),
            "else" => Some(TokenKind::Else),
            "function" => Some(TokenKind::Function),
            "read" => Some(TokenKind::Read),
            "write" => Some(TokenKind::Write),
            _ => None,
        }
    }

    pub fn is_relational(self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::LessEqual
                | TokenKind::Less
                | TokenKind::GreaterEqual
                | TokenKind::Greater
        )
    }

    pub fn is_end_marker(self) -> bool {
        matches!(self, TokenKind::Eoln | TokenKind::Eof)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Begin => write!(f, "'begin'"),
            TokenKind::End => write!(f, "'end'"),
            TokenKind::Integer => write!(f, "'integer'"),
            TokenKind::If => write!(f, "'if'"),
            TokenKind::Then => write!(f, "'then'"),
            TokenKind::Else => write!(f, "'else'"),
            TokenKind::Function => write!(f, "'function'"),
            TokenKind::Read => write!(f, "'read'"),
            TokenKind::Write => write!(f, "'write'"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Constant => write!(f, "constant"),
            TokenKind::Equal => write!(f, "'='"),
            TokenKind::NotEqual => write!(f, "'<>'"),
            TokenKind::LessEqual => write!(f, "'<='"),
            TokenKind::Less => write!(f, "'<'"),
            TokenKind::GreaterEqual => write!(f, "'>='"),
            TokenKind::Greater => write!(f, "'>'"),
            TokenKind::Subtract => write!(f, "'-'"),
            TokenKind::Multiply => write!(f, "'*'"),
            TokenKind::Assign => write!(f, "':='"),
            TokenKind::BracketLeft => write!(f, "'('"),
            TokenKind::BracketRight => write!(f, "')'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Eoln => write!(f, "end of line"),
            TokenKind::Eof => write!(f, "end of file"),
        }
    }
}

/// A classified lexeme together with the 1-based line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn new(lexeme: impl Into<String>, kind: TokenKind, line: usize) -> Self {
        Self {
            lexeme: lexeme.into(),
            kind,
            line,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.lexeme, self.kind.code())
    }
}

/// Drop `EOLN`/`EOF` markers, keeping only the tokens the grammar consumes.
pub fn strip_end_markers(tokens: Vec<Token>) -> Vec<Token> {
    tokens
        .into_iter()
        .filter(|t| !t.kind.is_end_marker())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_cover_one_to_twenty_five() {
        assert_eq!(TokenKind::from_code(0), None);
        assert_eq!(TokenKind::from_code(1), Some(TokenKind::Begin));
        assert_eq!(TokenKind::from_code(20), Some(TokenKind::Assign));
        assert_eq!(TokenKind::from_code(25), Some(TokenKind::Eof));
        assert_eq!(TokenKind::from_code(26), None);
        for kind in TokenKind::ALL {
            assert_eq!(TokenKind::from_code(kind.code()), Some(kind));
        }
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(TokenKind::keyword("function"), Some(TokenKind::Function));
        assert_eq!(TokenKind::keyword("Begin"), None);
        assert_eq!(TokenKind::keyword("x"), None);
    }

    #[test]
    fn test_strip_end_markers() {
        let tokens = vec![
            Token::new("begin", TokenKind::Begin, 1),
            Token::new("EOLN", TokenKind::Eoln, 1),
            Token::new("end", TokenKind::End, 2),
            Token::new("EOF", TokenKind::Eof, 2),
        ];
        let kinds: Vec<_> = strip_end_markers(tokens).iter().map(|t| t.kind).collect();
        assert_eq!(kinds, vec![TokenKind::Begin, TokenKind::End]);
    }
}
