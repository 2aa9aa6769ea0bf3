//! Atom matching over raw source characters
//!
//! The grammar has no separate tokenization pass. Every atomic parse (variable
//! name, digit run, keyword, operator symbol, bracket) goes through one of the
//! `match_*` functions here, which skip leading whitespace and then either
//! return the matched value with the offset just past it, or a [`LexError`]
//! naming what was expected at the offset where matching stopped.
//!
//! All functions take `&[char]` plus an offset and never mutate anything, so a
//! failed match leaves callers free to try another alternative from the same
//! offset.

use super::ast::SourceLocation;
use thiserror::Error;

/// Recoverable mismatch of a single atom.
///
/// `offset` is where the unexpected character (or end of input) sits, after
/// whitespace has been skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("expected {expected} at offset {offset}")]
pub struct LexError {
    pub expected: &'static str,
    pub offset: usize,
}

pub type Matched<T> = Result<(T, usize), LexError>;

/// Skip whitespace starting at `pos`
pub fn skip_whitespace(input: &[char], pos: usize) -> usize {
    let mut pos = pos;
    while input.get(pos).is_some_and(|ch| ch.is_whitespace()) {
        pos += 1;
    }
    pos
}

/// Match an exact literal such as `=`, `if` or `end`
pub fn match_literal(
    input: &[char],
    pos: usize,
    literal: &str,
    expected: &'static str,
) -> Result<usize, LexError> {
    let start = skip_whitespace(input, pos);
    let mut offset = start;

    for expected_ch in literal.chars() {
        if input.get(offset) != Some(&expected_ch) {
            return Err(LexError {
                expected,
                offset: start,
            });
        }
        offset += 1;
    }

    Ok(offset)
}

/// Match one character accepted by `accept`
pub fn match_char(
    input: &[char],
    pos: usize,
    accept: impl Fn(char) -> bool,
    expected: &'static str,
) -> Matched<char> {
    let start = skip_whitespace(input, pos);
    match input.get(start) {
        Some(&ch) if accept(ch) => Ok((ch, start + 1)),
        _ => Err(LexError {
            expected,
            offset: start,
        }),
    }
}

/// Match a single lowercase letter
pub fn match_variable(input: &[char], pos: usize) -> Matched<char> {
    match_char(input, pos, |ch| ch.is_ascii_lowercase(), "variable")
}

/// Match a maximal run of decimal digits
pub fn match_digits(input: &[char], pos: usize) -> Matched<String> {
    let start = skip_whitespace(input, pos);
    let end = digit_run_end(input, start);

    if end == start {
        return Err(LexError {
            expected: "constant",
            offset: start,
        });
    }

    Ok((input[start..end].iter().collect(), end))
}

/// Offset just past the digit run starting at `pos` (equal to `pos` if none)
pub fn digit_run_end(input: &[char], pos: usize) -> usize {
    let mut end = pos;
    while input.get(end).is_some_and(|ch| ch.is_ascii_digit()) {
        end += 1;
    }
    end
}

/// Offsets of line starts, for turning character offsets into line/column.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    len: usize,
}

impl LineIndex {
    pub fn new(input: &[char]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            input
                .iter()
                .enumerate()
                .filter(|(_, ch)| **ch == '\n')
                .map(|(offset, _)| offset + 1),
        );
        LineIndex {
            line_starts,
            len: input.len(),
        }
    }

    /// 1-based line and column of a character offset.
    ///
    /// Offsets past the end of input map to the position right after the last
    /// character.
    pub fn locate(&self, offset: usize) -> SourceLocation {
        let offset = offset.min(self.len);
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next_line) => next_line - 1,
        };
        SourceLocation::new(line + 1, offset - self.line_starts[line] + 1)
    }
}
