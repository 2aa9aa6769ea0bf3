//! Rendering ASTs back to text
//!
//! Expressions are fully parenthesized (`(a + (b * c))`), statements are
//! printed one per line and every nested body is indented by one more tab.
//! By default the `end` that closes `if` and `while` is left out, so the
//! output is a display aid rather than valid source; enable
//! [`Printer::with_terminators`] to get text that parses back to the same tree.

use crate::parser::ast::*;
use std::fmt;

/// What a printed line stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line for a statement; for `if`/`while` this is the header line
    Statement(&'a Statement),
    /// The `end` closing a block
    End,
}

/// One output line, without indentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub depth: usize,
    pub text: String,
    pub kind: LineKind<'a>,
}

/// AST printer
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    terminators: bool,
}

enum Work<'a> {
    Statement(&'a Statement, usize),
    End(usize),
}

impl Printer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit an `end` line after every `if`/`while` body
    pub fn with_terminators(mut self, terminators: bool) -> Self {
        self.terminators = terminators;
        self
    }

    pub fn print_program(&self, program: &Program) -> String {
        render(&self.lines(program))
    }

    pub fn print_statement(&self, statement: &Statement) -> String {
        render(&self.lines_from(vec![Work::Statement(statement, 0)]))
    }

    /// Lay out `program` line by line.
    pub fn lines<'a>(&self, program: &'a Program) -> Vec<Line<'a>> {
        let work = program
            .iter()
            .rev()
            .map(|statement| Work::Statement(statement, 0))
            .collect();
        self.lines_from(work)
    }

    // Explicit stack instead of recursion so long or deeply nested programs
    // cannot overflow the call stack.
    fn lines_from<'a>(&self, mut stack: Vec<Work<'a>>) -> Vec<Line<'a>> {
        let mut lines = Vec::new();

        while let Some(work) = stack.pop() {
            let (statement, depth) = match work {
                Work::End(depth) => {
                    lines.push(Line {
                        depth,
                        text: "end".to_string(),
                        kind: LineKind::End,
                    });
                    continue;
                }
                Work::Statement(statement, depth) => (statement, depth),
            };

            let (text, body) = match statement {
                Statement::Assignment(a) => (format!("{} = {}", a.target, a.value), None),
                Statement::If(i) => (format!("if {}", i.condition), Some(&i.body)),
                Statement::While(w) => (format!("while {}", w.condition), Some(&w.body)),
            };

            lines.push(Line {
                depth,
                text,
                kind: LineKind::Statement(statement),
            });

            if let Some(body) = body {
                if self.terminators {
                    stack.push(Work::End(depth));
                }
                stack.extend(body.iter().rev().map(|s| Work::Statement(s, depth + 1)));
            }
        }

        lines
    }
}

fn render(lines: &[Line<'_>]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&"\t".repeat(line.depth));
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.digits)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Pieces of an expression still to be written
enum Piece<'a> {
    Expression(&'a Expression),
    Operator(Operator),
    Close,
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = vec![Piece::Expression(self)];

        while let Some(piece) = pending.pop() {
            match piece {
                Piece::Expression(Expression::Variable(var)) => write!(f, "{}", var)?,
                Piece::Expression(Expression::Constant(constant)) => write!(f, "{}", constant)?,
                Piece::Expression(Expression::Operation {
                    left,
                    operator,
                    right,
                }) => {
                    f.write_str("(")?;
                    pending.push(Piece::Close);
                    pending.push(Piece::Expression(right));
                    pending.push(Piece::Operator(*operator));
                    pending.push(Piece::Expression(left));
                }
                Piece::Operator(operator) => write!(f, " {} ", operator)?,
                Piece::Close => f.write_str(")")?,
            }
        }

        Ok(())
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.target, self.value)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Printer::new().print_statement(self).trim_end_matches('\n'))
    }
}

impl fmt::Display for StatementList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::new().print_program(self))
    }
}
