//! Expression parsing implementation
//!
//! The only operators are `-` (binding loosest) and `*`; both are
//! left-associative, written as right-recursive tails and parsed as loops.
//!
//! # Grammar
//!
//! ```text
//! CondExpr ::= Expr RelOp Expr
//! Expr     ::= Term $Expr
//! $Expr    ::= "-" Term $Expr | ε
//! Term     ::= Factor $Term
//! $Term    ::= "*" Factor $Term | ε
//! Factor   ::= Var | Constant | FuncCall
//! FuncCall ::= Identifier "(" Expr ")"
//! Var      ::= Identifier
//! RelOp    ::= "=" | "<>" | "<=" | "<" | ">=" | ">"
//! ```

use crate::parser::parse::{ParseErrorKind, ParseResult, Parser};
use crate::parser::token::TokenKind;

impl Parser<'_> {
    pub(crate) fn parse_condition(&mut self) -> ParseResult {
        self.parse_expression()?;
        self.parse_relational_operator()?;
        self.parse_expression()
    }

    fn parse_relational_operator(&mut self) -> ParseResult {
        match self.current_kind() {
            Some(kind) if kind.is_relational() => self.advance(),
            _ => {
                let found = self.found();
                self.report(ParseErrorKind::ExpectedRelOp(found));
                Ok(())
            }
        }
    }

    pub(crate) fn parse_expression(&mut self) -> ParseResult {
        self.parse_term()?;
        while self.check(TokenKind::Subtract) {
            self.advance()?;
            self.parse_term()?;
        }
        Ok(())
    }

    fn parse_term(&mut self) -> ParseResult {
        self.parse_factor()?;
        while self.check(TokenKind::Multiply) {
            self.advance()?;
            self.parse_factor()?;
        }
        Ok(())
    }

    fn parse_factor(&mut self) -> ParseResult {
        match self.current_kind() {
            Some(TokenKind::Identifier) => {
                if self.peek_kind(1) == Some(TokenKind::BracketLeft) {
                    self.parse_function_call()
                } else {
                    self.parse_variable()
                }
            }
            Some(TokenKind::Constant) => self.advance(),
            _ => {
                let found = self.found();
                self.report(ParseErrorKind::ExpectedFactor(found));
                Ok(())
            }
        }
    }

    fn parse_function_call(&mut self) -> ParseResult {
        let name = self.current_lexeme();
        if self.symbols.resolve_procedure(&name, self.scope).is_none() {
            self.report(ParseErrorKind::UndefinedFunction(name));
        }
        self.advance()?;
        self.expect(TokenKind::BracketLeft, "in function call")?;
        self.parse_expression()?;
        self.expect(TokenKind::BracketRight, "in function call")
    }

    /// A use of a variable: it must resolve through the enclosing scopes.
    /// A non-identifier is reported and still looked up, then consumed.
    pub(crate) fn parse_variable(&mut self) -> ParseResult {
        if !self.check(TokenKind::Identifier) {
            let found = self.found();
            self.report(ParseErrorKind::NotIdentifier(found));
        }
        let name = self.current_lexeme();
        if self
            .symbols
            .resolve_variable(&name, self.scope, self.level)
            .is_none()
        {
            self.report(ParseErrorKind::UndefinedVariable(name));
        }
        self.advance()
    }
}
