//! Persisted artifacts of a compiler run
//!
//! Every file is named after the input path with its extension replaced:
//!
//! | file    | contents                                           |
//! |---------|----------------------------------------------------|
//! | `S.dyd` | token stream, `{lexeme:>16} {code:>2}` per line     |
//! | `S.err` | diagnostics, `***LINE:<n>  <message>` per line      |
//! | `S.pro` | procedure table, five 16-wide columns              |
//! | `S.var` | variable table, five 16-wide columns               |
//!
//! The `.dyd` codec is lossless for lexemes and kinds; token lines are
//! rebuilt from the `EOLN` markers on the way back in.

use crate::constants::{KIND_WIDTH, LEXEME_WIDTH, TABLE_COLUMN_WIDTH};
use crate::errors::FatalError;
use crate::parser::token::{Token, TokenKind};
use crate::symbols::SymbolTable;
use log::debug;
use std::fmt::{Display, Write as _};
use std::fs::{self, OpenOptions};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

/// Output locations derived from one source path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub source: PathBuf,
    pub tokens: PathBuf,
    pub errors: PathBuf,
    pub procedures: PathBuf,
    pub variables: PathBuf,
}

impl ArtifactPaths {
    pub fn from_source(source: impl AsRef<Path>) -> Self {
        let source = source.as_ref();
        Self {
            source: source.to_path_buf(),
            tokens: source.with_extension("dyd"),
            errors: source.with_extension("err"),
            procedures: source.with_extension("pro"),
            variables: source.with_extension("var"),
        }
    }
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> FatalError + '_ {
    move |source| FatalError::WriteArtifact {
        path: path.to_path_buf(),
        source,
    }
}

fn read_error(path: &Path) -> impl FnOnce(io::Error) -> FatalError + '_ {
    move |source| FatalError::ReadArtifact {
        path: path.to_path_buf(),
        source,
    }
}

pub fn read_source(path: &Path) -> Result<String, FatalError> {
    fs::read_to_string(path).map_err(|source| FatalError::OpenSource {
        path: path.to_path_buf(),
        source,
    })
}

// ===== Token stream =====

pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(
            out,
            "{:>lw$} {:>kw$}",
            token.lexeme,
            token.kind.code(),
            lw = LEXEME_WIDTH,
            kw = KIND_WIDTH
        );
    }
    out
}

/// Decode `.dyd` text. Each line is `<lexeme> <code>` after trimming.
pub fn parse_tokens(text: &str) -> Result<Vec<Token>, FatalError> {
    let mut tokens = Vec::new();
    let mut line = 1;

    for (index, entry) in text.lines().enumerate() {
        let file_line = index + 1;
        let (lexeme, code) = entry
            .trim()
            .split_once(' ')
            .filter(|(lexeme, _)| !lexeme.is_empty())
            .ok_or_else(|| FatalError::MalformedTokenFile {
                line: file_line,
                entry: entry.to_string(),
            })?;

        let code = code.trim();
        let kind = code
            .parse::<u8>()
            .ok()
            .and_then(TokenKind::from_code)
            .ok_or_else(|| FatalError::InvalidKindCode {
                line: file_line,
                code: code.to_string(),
            })?;

        tokens.push(Token::new(lexeme, kind, line));
        if kind == TokenKind::Eoln {
            line += 1;
        }
    }
    Ok(tokens)
}

pub fn write_tokens(path: &Path, tokens: &[Token]) -> Result<(), FatalError> {
    debug!("writing {} tokens to {}", tokens.len(), path.display());
    fs::write(path, format_tokens(tokens)).map_err(write_error(path))
}

pub fn read_tokens(path: &Path) -> Result<Vec<Token>, FatalError> {
    let text = fs::read_to_string(path).map_err(read_error(path))?;
    parse_tokens(&text)
}

// ===== Diagnostic log =====

fn diagnostic_lines<D: Display>(diagnostics: &[D]) -> String {
    let mut out = String::new();
    for diagnostic in diagnostics {
        let _ = writeln!(out, "{}", diagnostic);
    }
    out
}

/// Start a fresh `.err` file holding `diagnostics`.
pub fn create_error_log<D: Display>(path: &Path, diagnostics: &[D]) -> Result<(), FatalError> {
    fs::write(path, diagnostic_lines(diagnostics)).map_err(write_error(path))
}

/// Append `diagnostics` to an existing (or missing) `.err` file.
pub fn append_error_log<D: Display>(path: &Path, diagnostics: &[D]) -> Result<(), FatalError> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(write_error(path))?;
    file.write_all(diagnostic_lines(diagnostics).as_bytes())
        .map_err(write_error(path))
}

/// Number of diagnostics in a `.err` file; a missing file has none.
pub fn count_logged_errors(path: &Path) -> Result<usize, FatalError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text.lines().filter(|l| !l.trim().is_empty()).count()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(0),
        Err(err) => Err(read_error(path)(err)),
    }
}

// ===== Symbol tables =====

fn table_row(out: &mut String, columns: [&dyn Display; 5]) {
    let row: Vec<String> = columns
        .iter()
        .map(|c| format!("{:>w$}", c, w = TABLE_COLUMN_WIDTH))
        .collect();
    let _ = writeln!(out, "{}", row.join(" "));
}

/// `name return_type level first_param last_param`, one row per procedure.
pub fn format_procedures(symbols: &SymbolTable) -> String {
    let mut out = String::new();
    for p in symbols.procedures() {
        table_row(
            &mut out,
            [
                &p.name,
                &p.return_type,
                &p.level,
                &p.first_param_index,
                &p.last_param_index,
            ],
        );
    }
    out
}

/// `name owner kind level table_index`, one row per variable.
pub fn format_variables(symbols: &SymbolTable) -> String {
    let mut out = String::new();
    for v in symbols.variables() {
        table_row(
            &mut out,
            [
                &v.name,
                &symbols.owner_name(v),
                &v.kind.code(),
                &v.level,
                &v.table_index,
            ],
        );
    }
    out
}

pub fn write_tables(paths: &ArtifactPaths, symbols: &SymbolTable) -> Result<(), FatalError> {
    fs::write(&paths.procedures, format_procedures(symbols))
        .map_err(write_error(&paths.procedures))?;
    fs::write(&paths.variables, format_variables(symbols))
        .map_err(write_error(&paths.variables))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::lexer::tokenize;
    use crate::symbols::VarKind;

    #[test]
    fn test_paths_replace_extension() {
        let paths = ArtifactPaths::from_source("dir/prog.pas");
        assert_eq!(paths.tokens, PathBuf::from("dir/prog.dyd"));
        assert_eq!(paths.errors, PathBuf::from("dir/prog.err"));
        assert_eq!(paths.procedures, PathBuf::from("dir/prog.pro"));
        assert_eq!(paths.variables, PathBuf::from("dir/prog.var"));

        let bare = ArtifactPaths::from_source("prog");
        assert_eq!(bare.tokens, PathBuf::from("prog.dyd"));
    }

    #[test]
    fn test_token_line_format() {
        let text = format_tokens(&[
            Token::new("begin", TokenKind::Begin, 1),
            Token::new(":=", TokenKind::Assign, 1),
        ]);
        assert_eq!(
            text,
            "           begin  1\n              := 20\n"
        );
    }

    #[test]
    fn test_token_file_reproduces_stream() {
        let lexed = tokenize("begin\n  integer x;\n\n  x:=10\nend\n");
        let decoded = parse_tokens(&format_tokens(&lexed.tokens)).unwrap();
        assert_eq!(decoded, lexed.tokens);
    }

    #[test]
    fn test_invalid_kind_code() {
        let err = parse_tokens("           begin  1\n               x 26\n").unwrap_err();
        assert!(matches!(err, FatalError::InvalidKindCode { line: 2, ref code } if code == "26"));

        let err = parse_tokens("           begin  one\n").unwrap_err();
        assert!(matches!(err, FatalError::InvalidKindCode { line: 1, .. }));
    }

    #[test]
    fn test_malformed_token_entry() {
        let err = parse_tokens("begin\n").unwrap_err();
        assert!(matches!(err, FatalError::MalformedTokenFile { line: 1, .. }));
    }

    #[test]
    fn test_table_rows() {
        let mut symbols = SymbolTable::new();
        let root = symbols.root();
        symbols.declare_variable("x", root, VarKind::Local, "integer", 0);

        assert_eq!(
            format_procedures(&symbols),
            format!("{:>16} {:>16} {:>16} {:>16} {:>16}\n", "main", "void", 0, 0, 0)
        );
        assert_eq!(
            format_variables(&symbols),
            format!("{:>16} {:>16} {:>16} {:>16} {:>16}\n", "x", "main", 0, 0, 0)
        );
    }
}
