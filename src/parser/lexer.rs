//! Lexer (tokenizer) for the teaching language
//!
//! Converts raw source text into a flat [`Token`] stream plus a log of
//! [`LexError`]s. The lexer is a character-driven finite automaton: every
//! character is fed through the pure [`step`] function, which maps
//! `(state, char)` to the next state and at most one emitted token or error.
//! When a character terminates the lexeme in progress it is *replayed* from
//! [`State::Start`] so that e.g. `x;` yields both `x` and `;`.
//!
//! Each source line is followed by a synthetic space (forcing any lexeme in
//! progress to flush) and an `EOLN` marker; the stream ends with `EOF`.
//! Malformed input never aborts tokenization: it is logged and the automaton
//! returns to its start state.

use super::token::{strip_end_markers, Token, TokenKind};
use crate::constants::MAX_SYMBOL_LEN;
use log::{debug, trace};
use std::fmt;
use thiserror::Error;

/// Characters that end an identifier, number or illegal word.
const WORD_TERMINATORS: [char; 9] = ['=', '-', '*', '(', ')', '<', '>', ':', ';'];

/// Lexical error categories. The `Display` text is the logged message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("illegal symbol \"{0}\"")]
    IllegalSymbol(String),

    #[error("\":\" doesn't match")]
    ColonMismatch,

    #[error("illegal operator \"{0}\"")]
    IllegalOperator(String),

    #[error("symbol \"{0}\" too long (>=16)")]
    SymbolTooLong(String),

    #[error("number \"{0}\" too long (>=16)")]
    NumberTooLong(String),
}

/// A lexical diagnostic tagged with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub line: usize,
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***LINE:{}  {}", self.line, self.kind)
    }
}

impl std::error::Error for LexError {}

/// Automaton states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum State {
    Start,
    /// Letters followed by letters or digits
    Word(String),
    /// Run of digits
    Number(String),
    /// Saw `<`; may become `<=` or `<>`
    Less,
    /// Saw `>`; may become `>=`
    Greater,
    /// Saw `:`; must become `:=`
    Colon,
    /// Two or more operator characters that form no valid operator
    OperatorTail(String),
    /// Run containing a character outside the alphabet
    IllegalWord(String),
    /// Identifier broken by a stray character; only letters and digits
    /// are kept after the first one
    MalformedWord(String),
}

/// Output of a single transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Token(TokenKind, String),
    Error(LexErrorKind),
}

impl Event {
    fn token(kind: TokenKind, lexeme: &str) -> Self {
        Event::Token(kind, lexeme.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Transition {
    pub(crate) next: State,
    pub(crate) event: Option<Event>,
    /// Feed the same character again from the start state
    pub(crate) replay: bool,
}

impl Transition {
    fn stay(next: State) -> Self {
        Self {
            next,
            event: None,
            replay: false,
        }
    }

    fn emit(event: Event) -> Self {
        Self {
            next: State::Start,
            event: Some(event),
            replay: false,
        }
    }

    fn replay(event: Event) -> Self {
        Self {
            next: State::Start,
            event: Some(event),
            replay: true,
        }
    }
}

fn is_terminator(c: char) -> bool {
    c.is_whitespace() || WORD_TERMINATORS.contains(&c)
}

/// Characters that keep a would-be two-character operator growing.
fn is_operator(c: char) -> bool {
    c != ';' && WORD_TERMINATORS.contains(&c)
}

/// Advance the automaton by one character.
pub(crate) fn step(state: State, c: char) -> Transition {
    match state {
        State::Start => start(c),
        State::Word(mut word) => {
            if c.is_ascii_alphanumeric() {
                word.push(c);
                Transition::stay(State::Word(word))
            } else if is_terminator(c) {
                Transition::replay(accept_word(word))
            } else {
                word.push(c);
                Transition::stay(State::MalformedWord(word))
            }
        }
        State::Number(mut digits) => {
            if c.is_ascii_digit() {
                digits.push(c);
                Transition::stay(State::Number(digits))
            } else if is_terminator(c) {
                Transition::replay(accept_number(digits))
            } else {
                digits.push(c);
                Transition::stay(State::IllegalWord(digits))
            }
        }
        State::Less => match c {
            '=' => Transition::emit(Event::token(TokenKind::LessEqual, "<=")),
            '>' => Transition::emit(Event::token(TokenKind::NotEqual, "<>")),
            c if is_operator(c) => Transition::stay(State::OperatorTail(format!("<{c}"))),
            _ => Transition::replay(Event::token(TokenKind::Less, "<")),
        },
        State::Greater => match c {
            '=' => Transition::emit(Event::token(TokenKind::GreaterEqual, ">=")),
            c if is_operator(c) => Transition::stay(State::OperatorTail(format!(">{c}"))),
            _ => Transition::replay(Event::token(TokenKind::Greater, ">")),
        },
        State::Colon => match c {
            '=' => Transition::emit(Event::token(TokenKind::Assign, ":=")),
            _ => Transition::replay(Event::Error(LexErrorKind::ColonMismatch)),
        },
        State::OperatorTail(mut op) => {
            if is_operator(c) {
                op.push(c);
                Transition::stay(State::OperatorTail(op))
            } else {
                Transition::replay(Event::Error(LexErrorKind::IllegalOperator(op)))
            }
        }
        State::MalformedWord(mut word) => {
            if is_terminator(c) {
                Transition::replay(Event::Error(LexErrorKind::IllegalSymbol(word)))
            } else {
                if c.is_ascii_alphanumeric() {
                    word.push(c);
                }
                Transition::stay(State::MalformedWord(word))
            }
        }
        State::IllegalWord(mut word) => {
            if is_terminator(c) {
                Transition::replay(Event::Error(LexErrorKind::IllegalSymbol(word)))
            } else {
                word.push(c);
                Transition::stay(State::IllegalWord(word))
            }
        }
    }
}

fn start(c: char) -> Transition {
    match c {
        'a'..='z' | 'A'..='Z' => Transition::stay(State::Word(c.to_string())),
        '0'..='9' => Transition::stay(State::Number(c.to_string())),
        '=' => Transition::emit(Event::token(TokenKind::Equal, "=")),
        '-' => Transition::emit(Event::token(TokenKind::Subtract, "-")),
        '*' => Transition::emit(Event::token(TokenKind::Multiply, "*")),
        '(' => Transition::emit(Event::token(TokenKind::BracketLeft, "(")),
        ')' => Transition::emit(Event::token(TokenKind::BracketRight, ")")),
        ';' => Transition::emit(Event::token(TokenKind::Semicolon, ";")),
        '<' => Transition::stay(State::Less),
        '>' => Transition::stay(State::Greater),
        ':' => Transition::stay(State::Colon),
        c if c.is_whitespace() => Transition::stay(State::Start),
        _ => Transition::stay(State::IllegalWord(c.to_string())),
    }
}

fn accept_word(word: String) -> Event {
    if word.len() >= MAX_SYMBOL_LEN {
        return Event::Error(LexErrorKind::SymbolTooLong(word));
    }
    let kind = TokenKind::keyword(&word).unwrap_or(TokenKind::Identifier);
    Event::Token(kind, word)
}

fn accept_number(digits: String) -> Event {
    if digits.len() >= MAX_SYMBOL_LEN {
        Event::Error(LexErrorKind::NumberTooLong(digits))
    } else {
        Event::Token(TokenKind::Constant, digits)
    }
}

/// Result of tokenizing one source unit.
#[derive(Debug, Clone, Default)]
pub struct Lexed {
    /// Every token including `EOLN`/`EOF` markers, in source order
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Lexed {
    /// The token stream as the parser sees it.
    pub fn significant_tokens(&self) -> Vec<Token> {
        strip_end_markers(self.tokens.clone())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lexer over one source unit
pub struct Lexer<'src> {
    source: &'src str,
    state: State,
    line: usize,
    lexed: Lexed,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source string.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            state: State::Start,
            line: 0,
            lexed: Lexed::default(),
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(mut self) -> Lexed {
        let lines: Vec<&str> = self.source.lines().collect();
        // Trailing blank lines are not part of the program text
        let processed = lines
            .iter()
            .rposition(|l| !l.trim().is_empty())
            .map_or(0, |last| last + 1);

        for (index, text) in lines[..processed].iter().enumerate() {
            self.line = index + 1;
            for c in text.chars() {
                self.feed(c);
            }
            self.feed(' ');
            self.lexed
                .tokens
                .push(Token::new("EOLN", TokenKind::Eoln, self.line));
        }

        if self.state != State::Start {
            self.feed(' ');
        }
        // EOF sits on the line after the last one processed
        self.lexed
            .tokens
            .push(Token::new("EOF", TokenKind::Eof, processed + 1));

        debug!(
            "lexed {} lines into {} tokens with {} errors",
            processed,
            self.lexed.tokens.len(),
            self.lexed.errors.len()
        );
        self.lexed
    }

    fn feed(&mut self, c: char) {
        let mut pending = Some(c);
        while let Some(ch) = pending {
            let state = std::mem::replace(&mut self.state, State::Start);
            let transition = step(state, ch);
            self.state = transition.next;
            if let Some(event) = transition.event {
                self.record(event);
            }
            pending = transition.replay.then_some(ch);
        }
    }

    fn record(&mut self, event: Event) {
        match event {
            Event::Token(kind, lexeme) => {
                trace!("line {}: {} {}", self.line, kind, lexeme);
                self.lexed.tokens.push(Token::new(lexeme, kind, self.line));
            }
            Event::Error(kind) => {
                let error = LexError {
                    kind,
                    line: self.line,
                };
                debug!("{}", error);
                self.lexed.errors.push(error);
            }
        }
    }
}

/// Convenience wrapper around [`Lexer::tokenize`].
pub fn tokenize(source: &str) -> Lexed {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(lexed: &Lexed) -> Vec<TokenKind> {
        lexed.significant_tokens().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_simple_program() {
        let lexed = tokenize("begin integer x;x:=1;write(x)end");
        assert!(lexed.errors.is_empty());

        let pairs: Vec<(String, u8)> = lexed
            .significant_tokens()
            .into_iter()
            .map(|t| (t.lexeme, t.kind.code()))
            .collect();
        let expected = [
            ("begin", 1),
            ("integer", 3),
            ("x", 10),
            (";", 23),
            ("x", 10),
            (":=", 20),
            ("1", 11),
            (";", 23),
            ("write", 9),
            ("(", 21),
            ("x", 10),
            (")", 22),
            ("end", 2),
        ];
        assert_eq!(pairs.len(), expected.len());
        for ((lexeme, code), (want_lexeme, want_code)) in pairs.iter().zip(expected) {
            assert_eq!(lexeme, want_lexeme);
            assert_eq!(*code, want_code);
        }
    }

    #[test]
    fn test_end_markers() {
        let lexed = tokenize("begin\n  integer x\nend\n\n\n");
        let eolns = lexed
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Eoln)
            .count();
        assert_eq!(eolns, 3);
        assert_eq!(lexed.tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(matches!(lexed.significant_tokens()[2], Token { ref lexeme, line: 2, .. } if lexeme == "x"));
    }

    #[test]
    fn test_empty_source() {
        let lexed = tokenize("");
        assert_eq!(lexed.tokens.len(), 1);
        assert_eq!(lexed.tokens[0].kind, TokenKind::Eof);
        assert!(lexed.errors.is_empty());
    }

    #[test]
    fn test_relational_operators() {
        let lexed = tokenize("< <= <> > >= =");
        assert!(lexed.errors.is_empty());
        assert_eq!(
            kinds(&lexed),
            vec![
                TokenKind::Less,
                TokenKind::LessEqual,
                TokenKind::NotEqual,
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Equal,
            ]
        );
    }

    #[test]
    fn test_operators_without_spaces() {
        let lexed = tokenize("n<=0;m>k;a<b");
        assert!(lexed.errors.is_empty());
        assert_eq!(
            kinds(&lexed),
            vec![
                TokenKind::Identifier,
                TokenKind::LessEqual,
                TokenKind::Constant,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::Greater,
                TokenKind::Identifier,
                TokenKind::Semicolon,
                TokenKind::Identifier,
                TokenKind::Less,
                TokenKind::Identifier,
            ]
        );
    }

    #[test]
    fn test_bare_colon() {
        let lexed = tokenize("begin integer x:1 end");
        assert_eq!(
            lexed.errors,
            vec![LexError {
                kind: LexErrorKind::ColonMismatch,
                line: 1
            }]
        );
        assert_eq!(lexed.errors[0].to_string(), "***LINE:1  \":\" doesn't match");
        assert_eq!(
            kinds(&lexed),
            vec![
                TokenKind::Begin,
                TokenKind::Integer,
                TokenKind::Identifier,
                TokenKind::Constant,
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn test_illegal_operator() {
        let lexed = tokenize("x<<y");
        assert_eq!(lexed.errors.len(), 1);
        assert_eq!(
            lexed.errors[0].kind,
            LexErrorKind::IllegalOperator("<<".to_string())
        );
        assert_eq!(kinds(&lexed), vec![TokenKind::Identifier, TokenKind::Identifier]);
    }

    #[test]
    fn test_illegal_symbols() {
        let lexed = tokenize("a @b c\nab#c;");
        assert_eq!(
            lexed.errors,
            vec![
                LexError {
                    kind: LexErrorKind::IllegalSymbol("@b".to_string()),
                    line: 1
                },
                LexError {
                    kind: LexErrorKind::IllegalSymbol("ab#c".to_string()),
                    line: 2
                },
            ]
        );
        assert_eq!(
            kinds(&lexed),
            vec![TokenKind::Identifier, TokenKind::Identifier, TokenKind::Semicolon]
        );
    }

    #[test]
    fn test_broken_identifier_keeps_first_stray_character() {
        let lexed = tokenize("ab##c x");
        assert_eq!(
            lexed.errors[0].kind,
            LexErrorKind::IllegalSymbol("ab#c".to_string())
        );
        assert_eq!(kinds(&lexed), vec![TokenKind::Identifier]);

        // a run that starts illegal keeps everything
        let lexed = tokenize("@#b");
        assert_eq!(
            lexed.errors[0].kind,
            LexErrorKind::IllegalSymbol("@#b".to_string())
        );
    }

    #[test]
    fn test_digits_followed_by_letters() {
        let lexed = tokenize("12ab 34");
        assert_eq!(
            lexed.errors[0].kind,
            LexErrorKind::IllegalSymbol("12ab".to_string())
        );
        assert_eq!(kinds(&lexed), vec![TokenKind::Constant]);
    }

    #[test]
    fn test_length_boundary() {
        let lexed = tokenize("abcdefghijklmno 123456789012345");
        assert!(lexed.errors.is_empty());
        assert_eq!(kinds(&lexed), vec![TokenKind::Identifier, TokenKind::Constant]);

        let lexed = tokenize("abcdefghijklmnop 1234567890123456");
        assert_eq!(
            lexed.errors.iter().map(|e| e.kind.clone()).collect::<Vec<_>>(),
            vec![
                LexErrorKind::SymbolTooLong("abcdefghijklmnop".to_string()),
                LexErrorKind::NumberTooLong("1234567890123456".to_string()),
            ]
        );
        assert!(lexed.significant_tokens().is_empty());
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        let lexed = tokenize("Begin begin");
        assert_eq!(kinds(&lexed), vec![TokenKind::Identifier, TokenKind::Begin]);
    }

    #[test]
    fn test_step_replays_terminator() {
        let transition = step(State::Word("x".to_string()), ';');
        assert_eq!(
            transition.event,
            Some(Event::Token(TokenKind::Identifier, "x".to_string()))
        );
        assert!(transition.replay);
        assert_eq!(transition.next, State::Start);
    }
}
