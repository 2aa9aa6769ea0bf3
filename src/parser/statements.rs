//! Statement parsing implementation
//!
//! This module handles parsing of the three statement forms and of statement
//! lists:
//!
//! ```text
//! statement_list ::= statement+
//! statement      ::= variable '=' expression
//!                  | 'if' expression statement_list 'end'
//!                  | 'while' expression statement_list 'end'
//! ```
//!
//! Alternatives are tried in the order above, each from the same starting
//! offset. All parsing methods are implemented as `pub(crate)` methods on the
//! [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::{match_literal, match_variable, skip_whitespace};
use crate::parser::parse::{Alternative, ParseError, Parsed, Parser};
use tracing::trace;

/// Result of greedily parsing a statement list.
pub(crate) struct ListParse {
    pub list: StatementList,
    /// Offset right after the last statement of the list
    pub next: usize,
    /// Why the statement following the list failed to parse
    pub stopped_by: ParseError,
}

impl Parser {
    /// Parse one or more statements.
    ///
    /// Statements are consumed until one fails to parse; the last successful
    /// one terminates the list. The list itself fails only if not even the
    /// first statement parses.
    pub(crate) fn parse_statement_list(&self, pos: usize) -> Result<ListParse, ParseError> {
        let (head, mut next) = self.parse_statement(pos)?;
        let mut tail = Vec::new();

        let stopped_by = loop {
            match self.parse_statement(next) {
                Ok((statement, after)) => {
                    tail.push(statement);
                    next = after;
                }
                Err(err) => break err,
            }
        };

        Ok(ListParse {
            list: StatementList::new(head, tail),
            next,
            stopped_by,
        })
    }

    /// Parse a single statement
    pub(crate) fn parse_statement(&self, pos: usize) -> Parsed<Statement> {
        let start = skip_whitespace(&self.input, pos);

        // `end` can never start a statement; say so instead of reporting the
        // assignment alternative tripping over the `n`.
        if self.input[start..].starts_with(&['e', 'n', 'd']) {
            return Err(ParseError::UnexpectedToken {
                found: "end".to_string(),
                expected: "statement",
                location: self.location(start),
                offset: start,
            });
        }

        let result = self
            .parse_assignment(pos)
            .or_try(|| self.parse_if_statement(pos))
            .or_try(|| self.parse_while_statement(pos));

        match result {
            Ok((statement, next)) => {
                trace!(offset = start, "parsed statement");
                Ok((statement, next))
            }
            // Nothing matched at all
            Err(err) if err.offset() <= start => Err(self.unexpected(start, "statement")),
            Err(err) => Err(err),
        }
    }

    /// Parse `variable = expression`
    fn parse_assignment(&self, pos: usize) -> Parsed<Statement> {
        let (name, next) = match_variable(&self.input, pos).map_err(|e| self.lex_error(e))?;
        let next = match_literal(&self.input, next, "=", "'='").map_err(|e| self.lex_error(e))?;
        let (value, next) = self.parse_expression(next)?;

        Ok((
            Statement::Assignment(Assignment::new(Variable::new(name), value)),
            next,
        ))
    }

    /// Parse `if expression statement_list end`
    fn parse_if_statement(&self, pos: usize) -> Parsed<Statement> {
        let (condition, body, next) = self.parse_block("if", "'if'", pos)?;
        Ok((Statement::If(If { condition, body }), next))
    }

    /// Parse `while expression statement_list end`
    fn parse_while_statement(&self, pos: usize) -> Parsed<Statement> {
        let (condition, body, next) = self.parse_block("while", "'while'", pos)?;
        Ok((Statement::While(While { condition, body }), next))
    }

    /// Shared shape of `if` and `while`: keyword, condition, body, `end`.
    ///
    /// `expected` is how the keyword is named when it is missing.
    fn parse_block(
        &self,
        keyword: &'static str,
        expected: &'static str,
        pos: usize,
    ) -> Result<(Expression, StatementList, usize), ParseError> {
        let next =
            match_literal(&self.input, pos, keyword, expected).map_err(|e| self.lex_error(e))?;
        let opened_at = self.location(skip_whitespace(&self.input, pos));
        let (condition, next) = self.parse_expression(next)?;
        let body = self.parse_statement_list(next)?;

        match match_literal(&self.input, body.next, "end", "'end'") {
            Ok(after) => Ok((condition, body.list, after)),
            Err(missing) => {
                let err = if missing.offset >= self.input.len() {
                    ParseError::UnterminatedBlock {
                        keyword,
                        opened_at,
                        location: self.location(missing.offset),
                        offset: missing.offset,
                    }
                } else {
                    self.lex_error(missing)
                };
                // A statement that failed deeper inside the body explains more
                // than the missing `end` does.
                Err(body.stopped_by.furthest(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::parse::{parse_program, ParseError, Parser};
    use pretty_assertions::assert_eq;

    fn assign(target: char, value: Expression) -> Statement {
        Statement::assign(target, value)
    }

    #[test]
    fn test_parse_if_statement() {
        let program = parse_program("if a b = 1 end").unwrap();
        assert_eq!(
            program,
            StatementList::single(Statement::if_(
                Expression::variable('a'),
                StatementList::single(assign('b', Expression::constant("1"))),
            ))
        );
    }

    #[test]
    fn test_parse_while_with_multi_statement_body() {
        let source = "
            while x > 0
                x = x - 1
                y = y + x
            end
            z = y
        ";
        let program = parse_program(source).unwrap();
        assert_eq!(program.as_slice().len(), 2);

        match program.head() {
            Statement::While(w) => {
                assert_eq!(
                    w.condition,
                    Expression::operation(
                        Expression::variable('x'),
                        Operator::Gt,
                        Expression::constant("0")
                    )
                );
                assert_eq!(w.body.as_slice().len(), 2);
            }
            other => panic!("Expected while statement, got {other:?}"),
        }
        assert_eq!(program.last(), &assign('z', Expression::variable('y')));
    }

    #[test]
    fn test_parse_nested_blocks() {
        let source = "while a if b c = 1 end d = 2 end";
        let program = parse_program(source).unwrap();

        let inner_if = Statement::if_(
            Expression::variable('b'),
            StatementList::single(assign('c', Expression::constant("1"))),
        );
        let expected = StatementList::single(Statement::while_(
            Expression::variable('a'),
            StatementList::new(inner_if, vec![assign('d', Expression::constant("2"))]),
        ));
        assert_eq!(program, expected);
    }

    #[test]
    fn test_variables_named_like_keywords() {
        // `i`, `w` and `e` are ordinary variables
        let program = parse_program("i = 1 w = i e = w").unwrap();
        assert_eq!(
            program,
            StatementList::new(
                assign('i', Expression::constant("1")),
                vec![
                    assign('w', Expression::variable('i')),
                    assign('e', Expression::variable('w')),
                ],
            )
        );
    }

    #[test]
    fn test_missing_end_is_unterminated_block() {
        let err = parse_program("a = 1\nwhile a\n  a = a - 1\n").unwrap_err();
        match err {
            ParseError::UnterminatedBlock {
                keyword, opened_at, ..
            } => {
                assert_eq!(keyword, "while");
                assert_eq!(opened_at, SourceLocation::new(2, 1));
            }
            other => panic!("Expected unterminated block, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_end_in_nested_if() {
        let err = parse_program("while a if b c = 1 end").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnterminatedBlock {
                keyword: "while",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_keyword_is_named() {
        let parser = Parser::new("x = 1");
        let if_err = parser.parse_if_statement(0).unwrap_err();
        let while_err = parser.parse_while_statement(0).unwrap_err();

        assert!(matches!(if_err, ParseError::UnexpectedToken { expected: "'if'", .. }));
        assert!(matches!(
            while_err,
            ParseError::UnexpectedToken {
                expected: "'while'",
                ..
            }
        ));
    }

    #[test]
    fn test_body_error_beats_missing_end() {
        // The body stops at `c = (1 +)`, which is a better explanation than
        // "expected 'end' at c".
        let err = parse_program("if a b = 1 c = (1 +) end").unwrap_err();
        assert!(err.offset() > 11, "error reported too early: {err:?}");
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let err = parse_program("if a end").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnexpectedToken { ref found, .. } if found == "end"
        ));
    }

    #[test]
    fn test_malformed_atom_is_rejected() {
        let err = parse_program("a = #").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                found: "#".to_string(),
                expected: "expression",
                location: SourceLocation::new(1, 5),
                offset: 4,
            }
        );
    }

    #[test]
    fn test_unknown_operator_is_rejected() {
        assert!(parse_program("a = b % c").is_err());
        assert!(parse_program("if a == b c = 1 end").is_err());
    }
}
