// AST (Abstract Syntax Tree) definitions for the while-language

use std::fmt;
use std::hash::{Hash, Hasher};
use std::mem;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Variable reference. Names are exactly one lowercase letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub name: char,
}

impl Variable {
    pub fn new(name: char) -> Self {
        Variable { name }
    }
}

/// Integer literal, kept as the digits that appeared in the source
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constant {
    pub digits: String,
}

impl Constant {
    pub fn new(digits: impl Into<String>) -> Self {
        Constant {
            digits: digits.into(),
        }
    }
}

/// Highest precedence tier (loosest binding)
pub const MAX_TIER: usize = 2;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    // Tier 0
    Mul,
    Div,
    // Tier 1
    Add,
    Sub,
    // Tier 2
    Gt,
    Lt,
}

impl Operator {
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '>' => Some(Operator::Gt),
            '<' => Some(Operator::Lt),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Gt => '>',
            Operator::Lt => '<',
        }
    }

    /// Precedence tier; 0 binds tightest, [`MAX_TIER`] loosest.
    pub fn tier(self) -> usize {
        match self {
            Operator::Mul | Operator::Div => 0,
            Operator::Add | Operator::Sub => 1,
            Operator::Gt | Operator::Lt => 2,
        }
    }
}

/// Expression nodes.
///
/// Operator chains nest deeply on the left, so equality, hashing, cloning and
/// dropping walk the tree with explicit stacks instead of recursing.
#[derive(Debug)]
pub enum Expression {
    Variable(Variable),
    Constant(Constant),
    Operation {
        left: Box<Expression>,
        operator: Operator,
        right: Box<Expression>,
    },
}

impl Expression {
    pub fn variable(name: char) -> Self {
        Expression::Variable(Variable::new(name))
    }

    pub fn constant(digits: impl Into<String>) -> Self {
        Expression::Constant(Constant::new(digits))
    }

    pub fn operation(left: Expression, operator: Operator, right: Expression) -> Self {
        Expression::Operation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Every variable referenced by this expression, left to right.
    ///
    /// Repeated references are reported each time they occur.
    pub fn variables(&self) -> Vec<Variable> {
        self.prefix_nodes()
            .filter_map(|expr| match expr {
                Expression::Variable(var) => Some(*var),
                _ => None,
            })
            .collect()
    }

    /// Nodes in prefix order: an operation, then its left side, then its right.
    fn prefix_nodes(&self) -> PrefixNodes<'_> {
        PrefixNodes {
            pending: vec![self],
        }
    }

    /// Compare two nodes without looking at their children
    fn same_node(&self, other: &Expression) -> bool {
        match (self, other) {
            (Expression::Variable(a), Expression::Variable(b)) => a == b,
            (Expression::Constant(a), Expression::Constant(b)) => a == b,
            (
                Expression::Operation { operator: a, .. },
                Expression::Operation { operator: b, .. },
            ) => a == b,
            _ => false,
        }
    }

    /// Move any operation children into `detached`, leaving empty constants
    fn detach_operations(&mut self, detached: &mut Vec<Expression>) {
        if let Expression::Operation { left, right, .. } = self {
            for child in [left, right] {
                if matches!(**child, Expression::Operation { .. }) {
                    detached.push(mem::replace(&mut **child, Expression::constant(String::new())));
                }
            }
        }
    }
}

struct PrefixNodes<'a> {
    pending: Vec<&'a Expression>,
}

impl<'a> Iterator for PrefixNodes<'a> {
    type Item = &'a Expression;

    fn next(&mut self) -> Option<Self::Item> {
        let expr = self.pending.pop()?;
        if let Expression::Operation { left, right, .. } = expr {
            self.pending.push(right);
            self.pending.push(left);
        }
        Some(expr)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        // Prefix order with fixed arity identifies the tree
        let mut ours = self.prefix_nodes();
        let mut theirs = other.prefix_nodes();
        loop {
            match (ours.next(), theirs.next()) {
                (None, None) => return true,
                (Some(a), Some(b)) if a.same_node(b) => {}
                _ => return false,
            }
        }
    }
}

impl Eq for Expression {}

impl Hash for Expression {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for node in self.prefix_nodes() {
            match node {
                Expression::Variable(var) => {
                    state.write_u8(0);
                    var.hash(state);
                }
                Expression::Constant(constant) => {
                    state.write_u8(1);
                    constant.hash(state);
                }
                Expression::Operation { operator, .. } => {
                    state.write_u8(2);
                    operator.hash(state);
                }
            }
        }
    }
}

impl Clone for Expression {
    fn clone(&self) -> Self {
        // Walk down the left spine, then rebuild it bottom up
        let mut spine = Vec::new();
        let mut node = self;
        let bottom = loop {
            match node {
                Expression::Operation {
                    left,
                    operator,
                    right,
                } => {
                    spine.push((*operator, right));
                    node = &**left;
                }
                Expression::Variable(var) => break Expression::Variable(*var),
                Expression::Constant(constant) => break Expression::Constant(constant.clone()),
            }
        };

        spine
            .into_iter()
            .rev()
            .fold(bottom, |left, (operator, right)| {
                Expression::operation(left, operator, (**right).clone())
            })
    }
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut detached = Vec::new();
        self.detach_operations(&mut detached);
        while let Some(mut expr) = detached.pop() {
            expr.detach_operations(&mut detached);
        }
    }
}

/// `target = value`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub target: Variable,
    pub value: Expression,
}

impl Assignment {
    pub fn new(target: Variable, value: Expression) -> Self {
        Assignment { target, value }
    }
}

/// `if condition body end` (no else branch)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct If {
    pub condition: Expression,
    pub body: StatementList,
}

/// `while condition body end`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct While {
    pub condition: Expression,
    pub body: StatementList,
}

/// Statement nodes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    Assignment(Assignment),
    If(If),
    While(While),
}

impl Statement {
    pub fn assign(target: char, value: Expression) -> Self {
        Statement::Assignment(Assignment::new(Variable::new(target), value))
    }

    pub fn if_(condition: Expression, body: StatementList) -> Self {
        Statement::If(If { condition, body })
    }

    pub fn while_(condition: Expression, body: StatementList) -> Self {
        Statement::While(While { condition, body })
    }
}

impl From<Assignment> for Statement {
    fn from(assignment: Assignment) -> Self {
        Statement::Assignment(assignment)
    }
}

/// Ordered, non-empty sequence of statements.
///
/// The first statement is the head; whatever follows is the tail. A list with
/// a single statement uses that statement as its terminal element. There is no
/// way to build an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StatementList {
    statements: Vec<Statement>,
}

impl StatementList {
    pub fn new(head: Statement, tail: impl IntoIterator<Item = Statement>) -> Self {
        let mut statements = vec![head];
        statements.extend(tail);
        StatementList { statements }
    }

    pub fn single(statement: Statement) -> Self {
        StatementList {
            statements: vec![statement],
        }
    }

    pub fn head(&self) -> &Statement {
        &self.statements[0]
    }

    /// Statements after the head, or `None` when the head is the terminal element.
    pub fn tail(&self) -> Option<&[Statement]> {
        match &self.statements[1..] {
            [] => None,
            rest => Some(rest),
        }
    }

    pub fn last(&self) -> &Statement {
        &self.statements[self.statements.len() - 1]
    }

    pub fn as_slice(&self) -> &[Statement] {
        &self.statements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl<'a> IntoIterator for &'a StatementList {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Top-level program structure
pub type Program = StatementList;
