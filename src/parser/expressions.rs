//! Expression parsing implementation
//!
//! Binary operators come in three precedence tiers, tightest first:
//!
//! | tier | operators |
//! |------|-----------|
//! | 0    | `*` `/`   |
//! | 1    | `+` `-`   |
//! | 2    | `>` `<`   |
//!
//! A plain recursive descent grammar of the form `E ::= T (op E)?` nests to the
//! right, which would make `a - b - c` mean `a - (b - c)`. The parser works in
//! two steps instead:
//!
//! 1. [`Parser::capture_expression`] finds the longest run of the source that
//!    looks like `operand (operator operand)*` without building anything.
//! 2. That run is reversed character by character and handed to
//!    [`ReversedExpression`], a tiered grammar in which `)` opens a group and
//!    `(` closes it. Each tier reads its operands as a flat run, right to left
//!    in source order, and folds them from the far end with the operands put
//!    back in source order. The result is left-nested and left-associative.
//!
//! Only parenthesized groups recurse; a long operator chain is a loop.
//!
//! Digit runs read from the reversed text are reversed again so constants keep
//! their digits in source order.

use crate::parser::ast::*;
use crate::parser::lexer::{
    digit_run_end, match_char, match_digits, match_literal, match_variable, skip_whitespace,
    LexError, Matched,
};
use crate::parser::parse::{ParseError, Parsed, Parser};
use tracing::trace;

impl Parser {
    /// Parse an expression starting at `pos`
    pub(crate) fn parse_expression(&self, pos: usize) -> Parsed<Expression> {
        let (start, end) = self.capture_expression(pos)?;
        let reversed: Vec<char> = self.input[start..end].iter().rev().copied().collect();
        let parser = ReversedExpression { text: &reversed };

        let to_source =
            |err: LexError| self.unexpected(start + parser.source_offset(err.offset), err.expected);

        let (expr, consumed) = parser.parse(0, MAX_TIER).map_err(to_source)?;
        let consumed = skip_whitespace(&reversed, consumed);
        if consumed < reversed.len() {
            return Err(to_source(LexError {
                expected: "operator",
                offset: consumed,
            }));
        }

        trace!(start, end, "parsed expression");
        Ok((expr, end))
    }

    /// Find the extent of the expression starting at `pos`.
    ///
    /// Returns the character range `start..end` covering
    /// `operand (operator operand)*`, where an operand is a variable, a digit
    /// run or a parenthesized group. An operator that is not followed by an
    /// operand is left out of the range.
    pub(crate) fn capture_expression(&self, pos: usize) -> Result<(usize, usize), ParseError> {
        let start = skip_whitespace(&self.input, pos);
        let mut end = self.scan_operand(start)?;

        loop {
            let op_pos = skip_whitespace(&self.input, end);
            let is_operator = self
                .input
                .get(op_pos)
                .is_some_and(|&ch| Operator::from_symbol(ch).is_some());
            if !is_operator {
                break;
            }

            match self.scan_operand(skip_whitespace(&self.input, op_pos + 1)) {
                Ok(operand_end) => end = operand_end,
                Err(_) => break,
            }
        }

        Ok((start, end))
    }

    /// Offset right after the operand at `pos`, which must not be whitespace
    fn scan_operand(&self, pos: usize) -> Result<usize, ParseError> {
        match self.input.get(pos) {
            Some(ch) if ch.is_ascii_lowercase() => Ok(pos + 1),
            Some(ch) if ch.is_ascii_digit() => Ok(digit_run_end(&self.input, pos)),
            Some('(') => {
                let mut depth = 0usize;
                for (offset, &ch) in self.input.iter().enumerate().skip(pos) {
                    match ch {
                        '(' => depth += 1,
                        ')' => {
                            depth -= 1;
                            if depth == 0 {
                                return Ok(offset + 1);
                            }
                        }
                        _ => {}
                    }
                }
                Err(self.unexpected(self.input.len(), "')'"))
            }
            _ => Err(self.unexpected(pos, "expression")),
        }
    }
}

/// Tiered expression grammar over reversed source text.
///
/// Offsets handled here index into the reversed text; errors are mapped back to
/// source offsets by the caller.
struct ReversedExpression<'a> {
    text: &'a [char],
}

impl ReversedExpression<'_> {
    /// Map an offset in the reversed text to an offset from the start of the
    /// captured source range.
    fn source_offset(&self, reversed: usize) -> usize {
        if reversed >= self.text.len() {
            0
        } else {
            self.text.len() - 1 - reversed
        }
    }

    /// Parse an expression of at most the given tier
    fn parse(&self, pos: usize, tier: usize) -> Matched<Expression> {
        let (mut operand, mut next) = self.parse_tighter(pos, tier)?;

        // Operands arrive right to left. Each one becomes the right side of
        // the operator read after it.
        let mut rights = Vec::new();
        while let Ok((operator, after)) = self.match_operator(next, tier) {
            let (following, end) = self.parse_tighter(after, tier)?;
            rights.push((operator, std::mem::replace(&mut operand, following)));
            next = end;
        }

        let expr = rights
            .into_iter()
            .rev()
            .fold(operand, |left, (operator, right)| {
                Expression::operation(left, operator, right)
            });
        Ok((expr, next))
    }

    fn parse_tighter(&self, pos: usize, tier: usize) -> Matched<Expression> {
        if tier == 0 {
            self.parse_atom(pos)
        } else {
            self.parse(pos, tier - 1)
        }
    }

    /// Parse `) expression (`, a variable, or a constant
    fn parse_atom(&self, pos: usize) -> Matched<Expression> {
        let group = self.parse_group(pos);
        let group_err = match group {
            Ok(parsed) => return Ok(parsed),
            Err(err) => err,
        };

        if let Ok((name, next)) = match_variable(self.text, pos) {
            return Ok((Expression::variable(name), next));
        }

        if let Ok((digits, next)) = match_digits(self.text, pos) {
            let digits: String = digits.chars().rev().collect();
            return Ok((Expression::constant(digits), next));
        }

        let start = skip_whitespace(self.text, pos);
        if group_err.offset > start {
            Err(group_err)
        } else {
            Err(LexError {
                expected: "expression",
                offset: start,
            })
        }
    }

    fn parse_group(&self, pos: usize) -> Matched<Expression> {
        let next = match_literal(self.text, pos, ")", "'('")?;
        let (expr, next) = self.parse(next, MAX_TIER)?;
        let next = match_literal(self.text, next, "(", "')'")?;
        Ok((expr, next))
    }

    fn match_operator(&self, pos: usize, tier: usize) -> Matched<Operator> {
        let (symbol, next) = match_char(
            self.text,
            pos,
            |ch| Operator::from_symbol(ch).is_some_and(|op| op.tier() == tier),
            "operator",
        )?;
        let operator = Operator::from_symbol(symbol).ok_or(LexError {
            expected: "operator",
            offset: pos,
        })?;
        Ok((operator, next))
    }
}
