//! Analysis report rendering
//!
//! The report has two sections: the program as understood by the parser
//! (printed with [`Printer`]) and the unused assignments, one per line.
//! In color mode keywords are highlighted and every printed assignment that is
//! in the unused set is marked in the program listing as well.

use crate::analyzer::UnusedAssignments;
use crate::parser::ast::{Program, Statement};
use crate::printer::{Line, LineKind, Printer};
use crate::ui::theme::DEFAULT_THEME;
use crossterm::style::Stylize;

/// Renders a parsed program together with its unused assignments
pub struct Report<'a> {
    program: &'a Program,
    unused: &'a UnusedAssignments,
    printer: Printer,
    color: bool,
}

impl<'a> Report<'a> {
    pub fn new(program: &'a Program, unused: &'a UnusedAssignments) -> Self {
        Report {
            program,
            unused,
            printer: Printer::new(),
            color: false,
        }
    }

    pub fn with_printer(mut self, printer: Printer) -> Self {
        self.printer = printer;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();

        out.push_str(&self.heading("Parsed:"));
        out.push('\n');
        for line in self.printer.lines(self.program) {
            out.push_str(&"\t".repeat(line.depth));
            out.push_str(&self.program_line(&line));
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.heading("Unused assignments:"));
        out.push('\n');

        if self.unused.is_empty() {
            let none = if self.color {
                "(none)".with(DEFAULT_THEME.success).to_string()
            } else {
                "(none)".to_string()
            };
            out.push_str(&none);
            out.push('\n');
        }

        for assignment in self.unused {
            let text = assignment.to_string();
            if self.color {
                out.push_str(&text.with(DEFAULT_THEME.dead_store).to_string());
            } else {
                out.push_str(&text);
            }
            out.push('\n');
        }

        out
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.with(DEFAULT_THEME.heading).bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn program_line(&self, line: &Line<'_>) -> String {
        if !self.color {
            return line.text.clone();
        }

        match line.kind {
            LineKind::End => line.text.as_str().with(DEFAULT_THEME.keyword).to_string(),
            LineKind::Statement(Statement::Assignment(assignment)) => {
                if self.unused.contains(assignment) {
                    format!(
                        "{}  {}",
                        line.text.as_str().with(DEFAULT_THEME.dead_store),
                        "# unused".with(DEFAULT_THEME.comment)
                    )
                } else {
                    line.text.clone()
                }
            }
            LineKind::Statement(Statement::If(_) | Statement::While(_)) => {
                match line.text.split_once(' ') {
                    Some((keyword, rest)) => {
                        format!("{} {}", keyword.with(DEFAULT_THEME.keyword).bold(), rest)
                    }
                    None => line.text.clone(),
                }
            }
        }
    }
}
