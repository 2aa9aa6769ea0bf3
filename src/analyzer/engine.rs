//! Analyzer state and traversal

use crate::analyzer::loops::{FirstMention, LoopFrame};
use crate::parser::ast::*;
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};

/// Assignments found to be unused.
///
/// Membership is structural: two textually identical assignments at different
/// places in the program are the same entry. Iteration follows the order in
/// which entries were first flagged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnusedAssignments {
    order: Vec<Assignment>,
    members: FxHashSet<Assignment>,
}

impl UnusedAssignments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `assignment`; returns false if an equal one was already present.
    pub fn insert(&mut self, assignment: Assignment) -> bool {
        if self.members.contains(&assignment) {
            return false;
        }
        self.members.insert(assignment.clone());
        self.order.push(assignment);
        true
    }

    pub fn contains(&self, assignment: &Assignment) -> bool {
        self.members.contains(assignment)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Assignment> {
        self.order.iter()
    }
}

impl<'a> IntoIterator for &'a UnusedAssignments {
    type Item = &'a Assignment;
    type IntoIter = std::slice::Iter<'a, Assignment>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// A write not yet known to be read
#[derive(Debug, Clone, Copy)]
struct Pending<'a> {
    /// Order in which the write was made, used to report leftovers in source order
    seq: usize,
    assignment: &'a Assignment,
}

/// Single-pass dead-store analyzer.
///
/// An analyzer handles exactly one program: [`Analyzer::find_unused_assignments`]
/// consumes it.
#[derive(Debug, Default)]
pub struct Analyzer<'a> {
    pending: FxHashMap<Variable, Pending<'a>>,
    unused: UnusedAssignments,
    pub(crate) loops: Vec<LoopFrame>,
    writes: usize,
}

impl<'a> Analyzer<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the analysis over `program` and return every unused assignment.
    pub fn find_unused_assignments(mut self, program: &'a Program) -> UnusedAssignments {
        self.analyze_list(program);

        let mut leftovers: Vec<Pending<'a>> = self.pending.drain().map(|(_, p)| p).collect();
        leftovers.sort_by_key(|p| p.seq);
        for pending in leftovers {
            trace!(assignment = %pending.assignment, "unread at end of program");
            self.unused.insert(pending.assignment.clone());
        }

        debug!(unused = self.unused.len(), "dead-store analysis finished");
        self.unused
    }

    pub(crate) fn analyze_list(&mut self, list: &'a StatementList) {
        for statement in list {
            self.analyze_statement(statement);
        }
    }

    fn analyze_statement(&mut self, statement: &'a Statement) {
        match statement {
            Statement::Assignment(assignment) => self.analyze_assignment(assignment),
            Statement::If(if_stmt) => {
                self.read(&if_stmt.condition);
                self.analyze_list(&if_stmt.body);
            }
            Statement::While(while_stmt) => self.analyze_while(while_stmt),
        }
    }

    fn analyze_assignment(&mut self, assignment: &'a Assignment) {
        // The right side is evaluated before the write happens
        self.read(&assignment.value);

        let target = assignment.target;
        let seq = self.writes;
        self.writes += 1;

        if let Some(previous) = self.pending.insert(target, Pending { seq, assignment }) {
            trace!(assignment = %previous.assignment, "overwritten before being read");
            self.unused.insert(previous.assignment.clone());
        }
        self.record_first_mention(target, FirstMention::Write);
    }

    /// Every variable in `expr` is read: retire its pending write.
    pub(crate) fn read(&mut self, expr: &Expression) {
        for var in expr.variables() {
            self.record_first_mention(var, FirstMention::Read);
            self.retire(var);
        }
    }

    /// Mark the pending write of `var` (if any) as used.
    pub(crate) fn retire(&mut self, var: Variable) {
        self.pending.remove(&var);
    }
}

/// Find the unused assignments of `program` with a fresh [`Analyzer`]
pub fn find_unused_assignments(program: &Program) -> UnusedAssignments {
    Analyzer::new().find_unused_assignments(program)
}
