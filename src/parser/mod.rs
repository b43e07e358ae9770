//! Front end for the teaching language
//!
//! This module turns source text into symbol tables and diagnostics:
//! - [`token`]: Token kinds and their persisted codes
//! - [`lexer`]: Tokenization (source text → tokens + lexical errors)
//! - [`cursor`]: Recovers source lines while the parser walks the tokens
//! - [`parse`]: Recursive descent over the token stream, filling a
//!   [`SymbolTable`](crate::symbols::SymbolTable)
//!
//! # Language
//!
//! A program is `begin` declarations `;` statements `end`. Everything is an
//! `integer`; functions take exactly one parameter and may nest. Statements
//! are `read`, `write`, assignment and `if/then/else`. Expressions only know
//! `-` and `*`.
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent, one method per grammar rule. Syntax and
//! semantic errors are collected rather than returned; only I/O problems and
//! a token stream that disagrees with the source abort the parse.

pub mod cursor;
mod declarations;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;
pub mod token;
