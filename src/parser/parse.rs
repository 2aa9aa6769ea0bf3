//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, the backtracking combinator, and the top-level
//! [`Parser::parse_program`] entry point.
//!
//! # Parser Architecture
//!
//! The Parser is a backtracking recursive descent parser working directly on
//! source characters:
//! - This module: Parser struct, errors, helpers and coordination
//! - `statements`: assignments, `if`, `while` and statement lists
//! - `expressions`: expression capture and the reversed-text expression parser
//!
//! # Backtracking
//!
//! Every parse function takes the offset to start from and returns a
//! [`Parsed`] value: the node plus the offset after it, or a [`ParseError`].
//! Nothing is mutated while parsing, so when one grammar alternative fails the
//! next one is simply called with the same offset. When all alternatives fail,
//! the error that got furthest into the input is the one reported.

use crate::parser::ast::*;
use crate::parser::lexer::{skip_whitespace, LexError, LineIndex};
use thiserror::Error;
use tracing::debug;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Parse error at {location}: unexpected '{found}', expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: &'static str,
        location: SourceLocation,
        offset: usize,
    },

    #[error("Parse error at {location}: unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        expected: &'static str,
        location: SourceLocation,
        offset: usize,
    },

    #[error("Parse error at {location}: '{keyword}' opened at {opened_at} is missing its 'end'")]
    UnterminatedBlock {
        keyword: &'static str,
        opened_at: SourceLocation,
        location: SourceLocation,
        offset: usize,
    },
}

impl ParseError {
    /// Character offset in the source where the failure was detected
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { offset, .. }
            | ParseError::UnexpectedEndOfInput { offset, .. }
            | ParseError::UnterminatedBlock { offset, .. } => *offset,
        }
    }

    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::UnexpectedEndOfInput { location, .. }
            | ParseError::UnterminatedBlock { location, .. } => *location,
        }
    }

    /// Keep whichever error got further into the input; ties go to `other`.
    pub(crate) fn furthest(self, other: ParseError) -> ParseError {
        if other.offset() >= self.offset() {
            other
        } else {
            self
        }
    }
}

/// A parsed node together with the offset right after it
pub type Parsed<T> = Result<(T, usize), ParseError>;

/// Ordered choice between grammar alternatives.
pub(crate) trait Alternative<T> {
    /// Return `self` if it succeeded, otherwise try `alternative` from scratch.
    fn or_try(self, alternative: impl FnOnce() -> Parsed<T>) -> Parsed<T>;
}

impl<T> Alternative<T> for Parsed<T> {
    fn or_try(self, alternative: impl FnOnce() -> Parsed<T>) -> Parsed<T> {
        match self {
            Ok(parsed) => Ok(parsed),
            Err(first) => alternative().map_err(|second| first.furthest(second)),
        }
    }
}

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserConfig {
    /// Accept (and ignore) unparseable text after the last statement.
    pub allow_trailing_input: bool,
}

/// Recursive descent parser for the while-language
pub struct Parser {
    pub(crate) input: Vec<char>,
    lines: LineIndex,
    config: ParserConfig,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: &str, config: ParserConfig) -> Self {
        let input: Vec<char> = source.chars().collect();
        let lines = LineIndex::new(&input);
        Self {
            input,
            lines,
            config,
        }
    }

    /// Parse the entire program
    pub fn parse_program(&self) -> Result<Program, ParseError> {
        let parsed = self.parse_statement_list(0)?;
        let rest = skip_whitespace(&self.input, parsed.next);

        if rest < self.input.len() {
            if !self.config.allow_trailing_input {
                return Err(parsed.stopped_by);
            }
            debug!(offset = rest, "ignoring trailing input");
        }

        debug!(statements = parsed.list.as_slice().len(), "parsed program");
        Ok(parsed.list)
    }

    // ===== Helper methods =====

    pub(crate) fn location(&self, offset: usize) -> SourceLocation {
        self.lines.locate(offset)
    }

    /// Build the error for finding something other than `expected` at `offset`.
    pub(crate) fn unexpected(&self, offset: usize, expected: &'static str) -> ParseError {
        let location = self.location(offset);
        match self.input.get(offset) {
            Some(ch) => ParseError::UnexpectedToken {
                found: ch.to_string(),
                expected,
                location,
                offset,
            },
            None => ParseError::UnexpectedEndOfInput {
                expected,
                location,
                offset,
            },
        }
    }

    pub(crate) fn lex_error(&self, err: LexError) -> ParseError {
        self.unexpected(err.offset, err.expected)
    }
}

/// Parse `source` with the default (strict) configuration
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    Parser::new(source).parse_program()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_single_assignment() {
        let program = parse_program("a = 1").unwrap();
        assert_eq!(
            program,
            StatementList::single(Statement::assign('a', Expression::constant("1")))
        );
    }

    #[test]
    fn test_parse_program_is_never_empty() {
        let program = parse_program("a = 1\nb = a\nc = b").unwrap();
        assert_eq!(program.as_slice().len(), 3);
        assert_eq!(program.head(), &Statement::assign('a', Expression::constant("1")));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let err = parse_program("   ").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEndOfInput { offset: 3, .. }));
    }

    #[test]
    fn test_trailing_input_rejected_by_default() {
        let err = parse_program("a = 1\n$").unwrap_err();
        match err {
            ParseError::UnexpectedToken { found, location, .. } => {
                assert_eq!(found, "$");
                assert_eq!(location, SourceLocation::new(2, 1));
            }
            other => panic!("Expected unexpected token, got {other:?}"),
        }
    }

    #[test]
    fn test_trailing_input_allowed_by_config() {
        let config = ParserConfig {
            allow_trailing_input: true,
        };
        let program = Parser::with_config("a = 1\n$ garbage", config)
            .parse_program()
            .unwrap();
        assert_eq!(program.as_slice().len(), 1);
    }

    #[test]
    fn test_trailing_whitespace_is_fine() {
        assert!(parse_program("a = 1 \n\n\t").is_ok());
    }

    #[test]
    fn test_stray_end_is_reported() {
        let err = parse_program("a = 1 end").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: "end".to_string(),
                expected: "statement",
                location: SourceLocation::new(1, 7),
                offset: 6,
            }
        );
    }

    #[test]
    fn test_furthest_error_wins() {
        let near = ParseError::UnexpectedEndOfInput {
            expected: "x",
            location: SourceLocation::new(1, 1),
            offset: 0,
        };
        let far = ParseError::UnexpectedEndOfInput {
            expected: "y",
            location: SourceLocation::new(1, 5),
            offset: 4,
        };
        assert_eq!(near.clone().furthest(far.clone()), far);
        assert_eq!(far.clone().furthest(near), far);
    }

    #[test]
    fn test_error_display() {
        let err = parse_program("a = ").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 5: unexpected end of input, expected expression"
        );
    }
}
