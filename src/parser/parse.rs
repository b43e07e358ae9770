//! Main parser coordinator
//!
//! This module provides the [`Parser`] session and core parsing
//! infrastructure, including diagnostic types, helper methods, and the main
//! parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a recursive-descent walk over the grammar with left
//! recursion already eliminated:
//! - This module: Parser struct, helper methods, and `Program`
//! - `declarations`: declaration tables, variable and function declarations
//! - `statements`: executable statement tables
//! - `expressions`: arithmetic and conditional expressions, variable uses
//!
//! # Error recovery
//!
//! Grammar violations are recorded as [`ParseError`]s and parsing carries on
//! from wherever it stands. There is no resynchronisation, so one mistake can
//! produce several follow-on diagnostics. Only a token stream that does not
//! match the source text stops the run ([`FatalError::SourceMismatch`]).

use crate::errors::FatalError;
use crate::parser::cursor::SourceCursor;
use crate::parser::token::{strip_end_markers, Token, TokenKind};
use crate::symbols::{ProcId, SymbolTable};
use log::{debug, trace};
use std::fmt;
use thiserror::Error;

/// Syntax and scope diagnostics. The `Display` text is the logged message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("missing {expected} {context}")]
    Missing {
        expected: TokenKind,
        context: &'static str,
    },

    #[error("invalid declaration statement")]
    InvalidDeclaration,

    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("not a variable identifier: {0}")]
    NotIdentifier(String),

    #[error("function must declare exactly one parameter, found {0}")]
    MissingParameter(String),

    #[error("variable \"{0}\" redefined")]
    DuplicateVariable(String),

    #[error("function \"{0}\" redefined")]
    DuplicateFunction(String),

    #[error("variable not defined: {0}")]
    UndefinedVariable(String),

    #[error("function not declared: {0}")]
    UndefinedFunction(String),

    #[error("illegal start of statement: {0}")]
    IllegalStatement(String),

    #[error("expected constant, variable or function call, found {0}")]
    ExpectedFactor(String),

    #[error("not a relational operator: {0}")]
    ExpectedRelOp(String),

    #[error("unexpected symbol after program end: {0}")]
    TrailingSymbol(String),
}

/// A parse diagnostic tagged with the 1-based line of the current token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub line: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***LINE:{}  {}", self.line, self.kind)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult = Result<(), FatalError>;

/// Everything a completed parse produced.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    pub symbols: SymbolTable,
    pub errors: Vec<ParseError>,
}

impl ParseOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Recursive descent parser session over one source unit
pub struct Parser<'src> {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
    pub(crate) cursor: SourceCursor<'src>,
    pub(crate) symbols: SymbolTable,
    /// Procedure whose body is being parsed
    pub(crate) scope: ProcId,
    /// Nesting level of `scope`
    pub(crate) level: usize,
    pub(crate) errors: Vec<ParseError>,
}

impl<'src> Parser<'src> {
    /// `source` must be the text `tokens` were lexed from; it is only used to
    /// recover line numbers.
    pub fn new(tokens: Vec<Token>, source: &'src str) -> Self {
        let symbols = SymbolTable::new();
        let scope = symbols.root();
        Self {
            tokens: strip_end_markers(tokens),
            position: 0,
            cursor: SourceCursor::new(source),
            symbols,
            scope,
            level: 0,
            errors: Vec::new(),
        }
    }

    /// Parse the whole program
    pub fn parse_program(mut self) -> Result<ParseOutcome, FatalError> {
        if let Some(first) = self.tokens.first() {
            self.cursor.seek(&first.lexeme)?;
        }
        self.program()?;

        debug!(
            "parsed {} procedures, {} variables, {} errors",
            self.symbols.procedures().len(),
            self.symbols.variable_count(),
            self.errors.len()
        );
        Ok(ParseOutcome {
            symbols: self.symbols,
            errors: self.errors,
        })
    }

    /// Program := 'begin' DeclStmtTable ExecStmtTable 'end'
    fn program(&mut self) -> ParseResult {
        self.accept(TokenKind::Begin, "at start of program")?;
        self.parse_declaration_table()?;
        self.parse_statement_table()?;
        self.accept(TokenKind::End, "at end of program")?;

        if let Some(token) = self.current() {
            let lexeme = token.lexeme.clone();
            self.report(ParseErrorKind::TrailingSymbol(lexeme));
        }
        Ok(())
    }

    // ===== Helper methods =====

    pub(crate) fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub(crate) fn current_kind(&self) -> Option<TokenKind> {
        self.current().map(|t| t.kind)
    }

    /// Lexeme of the current token, empty at end of input.
    pub(crate) fn current_lexeme(&self) -> String {
        self.current().map(|t| t.lexeme.clone()).unwrap_or_default()
    }

    /// Description of the current token for diagnostics.
    pub(crate) fn found(&self) -> String {
        self.current()
            .map(|t| t.lexeme.clone())
            .unwrap_or_else(|| "end of input".to_string())
    }

    pub(crate) fn peek_kind(&self, n: usize) -> Option<TokenKind> {
        self.tokens.get(self.position + n).map(|t| t.kind)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current_kind() == Some(kind)
    }

    /// Move to the next token and locate it in the source.
    pub(crate) fn advance(&mut self) -> ParseResult {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        if let Some(token) = self.tokens.get(self.position) {
            trace!("advance to {}", token);
            self.cursor.seek(&token.lexeme)?;
        }
        Ok(())
    }

    pub(crate) fn report(&mut self, kind: ParseErrorKind) {
        let error = ParseError {
            kind,
            line: self.cursor.line(),
        };
        debug!("{}", error);
        self.errors.push(error);
    }

    /// Report unless the current token is `kind`; consume it either way.
    pub(crate) fn expect(&mut self, kind: TokenKind, context: &'static str) -> ParseResult {
        if !self.check(kind) {
            self.report(ParseErrorKind::Missing {
                expected: kind,
                context,
            });
        }
        self.advance()
    }

    /// Consume the current token if it is `kind`, otherwise report.
    pub(crate) fn accept(&mut self, kind: TokenKind, context: &'static str) -> ParseResult {
        if self.check(kind) {
            self.advance()
        } else {
            self.report(ParseErrorKind::Missing {
                expected: kind,
                context,
            });
            Ok(())
        }
    }
}

/// Parse a lexed token stream against its source text.
pub fn parse(tokens: Vec<Token>, source: &str) -> Result<ParseOutcome, FatalError> {
    Parser::new(tokens, source).parse_program()
}
