//! Declaration parsing implementation
//!
//! This module handles the declaration part of a block and everything that
//! registers symbols:
//!
//! - Declaration tables: `integer x; integer function f(a); ...`
//! - Variable declarations (declared, then resolved like any other use)
//! - Function declarations, their single parameter and their body
//!
//! # Grammar
//!
//! ```text
//! DeclStmtTable  ::= DeclStmt $DeclStmtTable
//! $DeclStmtTable ::= ";" DeclStmt $DeclStmtTable | ε
//! DeclStmt       ::= VarDecl | FuncDecl
//! VarDecl        ::= "integer" Identifier
//! FuncDecl       ::= "integer" "function" Identifier "(" Param ")" ";" FuncBody
//! FuncBody       ::= "begin" DeclStmtTable ExecStmtTable "end"
//! Param          ::= Identifier
//! ```
//!
//! `$DeclStmtTable` swallows the `;` that separates the last declaration from
//! the first statement; the `DeclStmt` after it is then a no-op.

use crate::constants::INTEGER_TYPE;
use crate::parser::parse::{ParseErrorKind, ParseResult, Parser};
use crate::parser::token::TokenKind;
use crate::symbols::{ProcId, VarKind};
use log::trace;

impl Parser<'_> {
    pub(crate) fn parse_declaration_table(&mut self) -> ParseResult {
        self.parse_declaration()?;
        while self.check(TokenKind::Semicolon) {
            self.advance()?;
            self.parse_declaration()?;
        }
        Ok(())
    }

    /// Dispatch on the token after `integer`; anything else is not a declaration.
    fn parse_declaration(&mut self) -> ParseResult {
        if !self.check(TokenKind::Integer) {
            return Ok(());
        }
        match self.peek_kind(1) {
            Some(TokenKind::Function) => self.parse_function_declaration(),
            Some(TokenKind::Identifier) => self.parse_variable_declaration(),
            Some(_) => {
                self.report(ParseErrorKind::InvalidDeclaration);
                Ok(())
            }
            None => {
                self.report(ParseErrorKind::UnexpectedEnd);
                Ok(())
            }
        }
    }

    fn parse_variable_declaration(&mut self) -> ParseResult {
        self.advance()?; // 'integer'
        let name = self.current_lexeme();
        let declared =
            self.symbols
                .declare_variable(&name, self.scope, VarKind::Local, INTEGER_TYPE, self.level);
        if declared.is_duplicate() {
            self.report(ParseErrorKind::DuplicateVariable(name));
        }
        self.parse_variable()
    }

    fn parse_function_declaration(&mut self) -> ParseResult {
        let return_type = self.current_lexeme();
        self.advance()?; // 'integer'
        self.expect(TokenKind::Function, "in function declaration")?;

        if !self.check(TokenKind::Identifier) {
            self.report(ParseErrorKind::Missing {
                expected: TokenKind::Identifier,
                context: "after 'function'",
            });
        }
        let name = self.current_lexeme();
        let enclosing = self.scope;
        let level = self.level + 1;

        let declared = self
            .symbols
            .declare_procedure(&name, &return_type, level, enclosing);
        if declared.is_duplicate() {
            self.report(ParseErrorKind::DuplicateFunction(name.clone()));
        }
        let function = declared.id();
        trace!("enter function {} at level {}", name, level);
        self.scope = function;
        self.level = level;

        // Return-value slot, owned by the function itself
        self.symbols
            .declare_variable(&name, function, VarKind::Local, &return_type, level);
        self.advance()?;

        self.expect(TokenKind::BracketLeft, "in function declaration")?;
        self.parse_parameter(function, !declared.is_duplicate())?;
        self.expect(TokenKind::BracketRight, "in function declaration")?;
        self.expect(TokenKind::Semicolon, "after function header")?;

        self.parse_function_body()?;

        trace!("leave function {}", name);
        self.scope = enclosing;
        self.level -= 1;
        Ok(())
    }

    /// Exactly one parameter. The token in its place is consumed regardless.
    fn parse_parameter(&mut self, function: ProcId, record_range: bool) -> ParseResult {
        let first = self.symbols.variable_count();
        if self.check(TokenKind::Identifier) {
            let name = self.current_lexeme();
            self.symbols.declare_variable(
                &name,
                function,
                VarKind::Parameter,
                INTEGER_TYPE,
                self.level,
            );
        } else {
            let found = self.found();
            self.report(ParseErrorKind::MissingParameter(found));
        }
        let last = self.symbols.variable_count();

        if record_range {
            self.symbols.set_param_range(function, first, last);
        }
        self.advance()
    }

    fn parse_function_body(&mut self) -> ParseResult {
        self.expect(TokenKind::Begin, "at start of function body")?;
        self.parse_declaration_table()?;
        self.parse_statement_table()?;
        self.expect(TokenKind::End, "at end of function body")
    }
}
