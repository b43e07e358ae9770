//! # Introduction
//!
//! simplec is the front end of a compiler for a small Pascal-like teaching
//! language. It tokenizes a program, checks it against the grammar and
//! builds the procedure and variable tables that later phases consume.
//!
//! ## Pipeline
//!
//! ```text
//! S → Lexer → S.dyd (+ S.err) → Parser → S.pro, S.var (+ S.err)
//! ```
//!
//! 1. [`parser::lexer`]: finite-automaton tokenizer with `EOLN`/`EOF`
//!    markers and per-line diagnostics.
//! 2. [`artifacts`]: fixed-width text formats for every intermediate file.
//! 3. [`parser::parse`]: recursive descent parser with scoped symbol
//!    resolution and error collection.
//! 4. [`symbols`]: the procedure and variable tables.
//! 5. [`driver`]: runs the two stages and enforces the phase boundary.

pub mod artifacts;
pub mod constants;
pub mod driver;
pub mod errors;
pub mod parser;
pub mod symbols;
