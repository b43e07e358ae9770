//! Two-stage compiler driver
//!
//! The lexer stage reads `S`, writes `S.dyd` and starts a fresh `S.err`.
//! The parser stage reads `S.dyd` back (re-reading `S` for line tracking),
//! appends its diagnostics to `S.err` and writes `S.pro` and `S.var`.
//!
//! The `S.err` line count is checked at each phase boundary: a stage never
//! starts on top of earlier errors, and a stage that logs errors fails after
//! writing its artifacts.

use crate::artifacts::{self, ArtifactPaths};
use crate::errors::FatalError;
use crate::parser::lexer::{self, Lexed};
use crate::parser::parse::{self, ParseOutcome};
use log::{debug, info};
use std::path::Path;

/// Tokenize the source unit and persist the token stream.
pub fn run_lexer(paths: &ArtifactPaths) -> Result<Lexed, FatalError> {
    let source = artifacts::read_source(&paths.source)?;
    eprintln!("*** lexical analysis: {}", paths.source.display());

    let lexed = lexer::tokenize(&source);
    artifacts::write_tokens(&paths.tokens, &lexed.tokens)?;
    artifacts::create_error_log(&paths.errors, &lexed.errors)?;
    for error in &lexed.errors {
        eprintln!("{}", error);
    }

    if lexed.has_errors() {
        return Err(FatalError::LexicalErrors {
            count: lexed.errors.len(),
            path: paths.errors.clone(),
        });
    }
    info!("{} tokens written to {}", lexed.tokens.len(), paths.tokens.display());
    Ok(lexed)
}

/// Parse the persisted token stream and write the symbol tables.
pub fn run_parser(paths: &ArtifactPaths) -> Result<ParseOutcome, FatalError> {
    ensure_clean(paths)?;
    eprintln!("*** syntax analysis: {}", paths.tokens.display());

    let tokens = artifacts::read_tokens(&paths.tokens)?;
    let source = artifacts::read_source(&paths.source)?;
    debug!("read {} tokens back from {}", tokens.len(), paths.tokens.display());

    let outcome = parse::parse(tokens, &source)?;
    artifacts::append_error_log(&paths.errors, &outcome.errors)?;
    for error in &outcome.errors {
        eprintln!("{}", error);
    }

    artifacts::write_tables(paths, &outcome.symbols)?;
    info!(
        "{} procedures, {} variables",
        outcome.symbols.procedures().len(),
        outcome.symbols.variables().len()
    );

    ensure_clean(paths)?;
    Ok(outcome)
}

/// Run both stages on `source`.
pub fn compile(source: &Path) -> Result<ParseOutcome, FatalError> {
    let paths = ArtifactPaths::from_source(source);
    run_lexer(&paths)?;
    let outcome = run_parser(&paths)?;
    eprintln!("*** done: {}", paths.source.display());
    Ok(outcome)
}

fn ensure_clean(paths: &ArtifactPaths) -> Result<(), FatalError> {
    let count = artifacts::count_logged_errors(&paths.errors)?;
    if count > 0 {
        return Err(FatalError::StagedErrors {
            count,
            path: paths.errors.clone(),
        });
    }
    Ok(())
}
