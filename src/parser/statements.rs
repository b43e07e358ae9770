//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! ExecStmtTable  ::= ExecStmt $ExecStmtTable
//! $ExecStmtTable ::= ";" ExecStmt $ExecStmtTable | ε
//! ExecStmt       ::= ReadStmt | WriteStmt | AssignStmt | CondStmt
//! ReadStmt       ::= "read" "(" Var ")"
//! WriteStmt      ::= "write" "(" Var ")"
//! AssignStmt     ::= Var ":=" Expr
//! CondStmt       ::= "if" CondExpr "then" ExecStmt "else" ExecStmt
//! ```

use crate::parser::parse::{ParseErrorKind, ParseResult, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_statement_table(&mut self) -> ParseResult {
        self.parse_statement()?;
        while self.check(TokenKind::Semicolon) {
            self.advance()?;
            self.parse_statement()?;
        }
        Ok(())
    }

    /// A token that cannot start a statement is reported but not consumed.
    pub(crate) fn parse_statement(&mut self) -> ParseResult {
        match self.current_kind() {
            Some(TokenKind::Read) => self.parse_io_statement("in read statement"),
            Some(TokenKind::Write) => self.parse_io_statement("in write statement"),
            Some(TokenKind::Identifier) => self.parse_assignment(),
            Some(TokenKind::If) => self.parse_conditional(),
            _ => {
                let found = self.found();
                self.report(ParseErrorKind::IllegalStatement(found));
                Ok(())
            }
        }
    }

    /// `read(Var)` or `write(Var)`; the keyword is already known.
    fn parse_io_statement(&mut self, context: &'static str) -> ParseResult {
        self.advance()?;
        self.expect(TokenKind::BracketLeft, context)?;
        self.parse_variable()?;
        self.expect(TokenKind::BracketRight, context)
    }

    fn parse_assignment(&mut self) -> ParseResult {
        self.parse_variable()?;
        self.expect(TokenKind::Assign, "in assignment")?;
        self.parse_expression()
    }

    fn parse_conditional(&mut self) -> ParseResult {
        self.advance()?; // 'if'
        self.parse_condition()?;
        self.expect(TokenKind::Then, "in conditional statement")?;
        self.parse_statement()?;
        self.expect(TokenKind::Else, "in conditional statement")?;
        self.parse_statement()
    }
}
