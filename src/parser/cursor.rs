//! Source line tracking for parse diagnostics
//!
//! The token stream handed to the parser carries no reliable position
//! information (it may have been read back from a `.dyd` file), so the parser
//! recovers line numbers by walking the original source text in lock-step:
//! each time a token becomes current, [`SourceCursor::seek`] looks for its
//! lexeme at the start of the unconsumed remainder of the current line,
//! pulling in further lines until it matches.

use crate::errors::FatalError;
use log::trace;

#[derive(Debug)]
pub struct SourceCursor<'src> {
    lines: std::str::Lines<'src>,
    rest: &'src str,
    line: usize,
}

impl<'src> SourceCursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lines: source.lines(),
            rest: "",
            line: 0,
        }
    }

    /// 1-based line of the most recently matched lexeme.
    pub fn line(&self) -> usize {
        self.line.max(1)
    }

    /// Consume `lexeme` from the source, advancing over lines as needed.
    ///
    /// Fails when the lexeme cannot be found before the source runs out,
    /// which means the token stream does not belong to this source.
    pub fn seek(&mut self, lexeme: &str) -> Result<(), FatalError> {
        while !self.rest.starts_with(lexeme) {
            match self.lines.next() {
                Some(next) => {
                    self.rest = next.trim_start();
                    self.line += 1;
                }
                None => {
                    return Err(FatalError::SourceMismatch {
                        line: self.line(),
                        expected: lexeme.to_string(),
                        remaining: self.rest.to_string(),
                    });
                }
            }
        }
        self.rest = self.rest[lexeme.len()..].trim_start();
        trace!("line {}: matched {:?}", self.line, lexeme);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracks_lines() {
        let mut cursor = SourceCursor::new("begin\n\n  integer x;\nend");
        cursor.seek("begin").unwrap();
        assert_eq!(cursor.line(), 1);
        cursor.seek("integer").unwrap();
        assert_eq!(cursor.line(), 3);
        cursor.seek("x").unwrap();
        cursor.seek(";").unwrap();
        assert_eq!(cursor.line(), 3);
        cursor.seek("end").unwrap();
        assert_eq!(cursor.line(), 4);
    }

    #[test]
    fn test_adjacent_lexemes() {
        let mut cursor = SourceCursor::new("x:=1;write(x)end");
        for lexeme in ["x", ":=", "1", ";", "write", "(", "x", ")", "end"] {
            cursor.seek(lexeme).unwrap();
        }
        assert_eq!(cursor.line(), 1);
    }

    #[test]
    fn test_mismatch_is_fatal() {
        let mut cursor = SourceCursor::new("begin\nend");
        cursor.seek("begin").unwrap();
        let err = cursor.seek("integer").unwrap_err();
        assert!(matches!(err, FatalError::SourceMismatch { ref expected, .. } if expected == "integer"));
    }
}
