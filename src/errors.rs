//! Fatal error types
//!
//! This module defines [`FatalError`], the conditions that stop a compiler
//! run outright. Ordinary lexical and syntax mistakes in the program are not
//! fatal: they are collected as [`LexError`](crate::parser::lexer::LexError)
//! and [`ParseError`](crate::parser::parse::ParseError) diagnostics and the
//! run continues.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FatalError {
    /// The input program could not be read
    #[error("cannot open source file {}: {source}", path.display())]
    OpenSource { path: PathBuf, source: io::Error },

    /// An output artifact could not be created or written
    #[error("cannot write {}: {source}", path.display())]
    WriteArtifact { path: PathBuf, source: io::Error },

    /// An intermediate artifact could not be read
    #[error("cannot read {}: {source}", path.display())]
    ReadArtifact { path: PathBuf, source: io::Error },

    /// A `.dyd` line without a lexeme and kind-code pair
    #[error("token file error (line {line}): malformed entry {entry:?}")]
    MalformedTokenFile { line: usize, entry: String },

    /// A `.dyd` kind code outside 1..=25
    #[error("token file error (line {line}): invalid kind code {code:?}")]
    InvalidKindCode { line: usize, code: String },

    /// The token stream cannot be matched against the source text
    #[error("source does not match token stream at line {line}: expected {expected:?}, found {remaining:?}")]
    SourceMismatch {
        line: usize,
        expected: String,
        remaining: String,
    },

    /// Lexical analysis reported diagnostics
    #[error("lexical analysis failed: {count} errors, see {}", path.display())]
    LexicalErrors { count: usize, path: PathBuf },

    /// The diagnostic log is non-empty at a phase boundary
    #[error("{count} errors, see {}", path.display())]
    StagedErrors { count: usize, path: PathBuf },
}
