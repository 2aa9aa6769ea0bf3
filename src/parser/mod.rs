//! While-language source parser
//!
//! This module transforms source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Atom matching (whitespace skipping, variables, digits, literals)
//! - [`parse`]: Parser struct, errors and the program entry point
//! - `statements`: Assignments, `if`, `while` and statement lists
//! - `expressions`: Tiered binary expressions via reversed-text parsing
//! - [`ast`]: AST node definitions
//!
//! # Grammar
//!
//! ```text
//! program        ::= statement_list
//! statement_list ::= statement+
//! statement      ::= variable '=' expression
//!                  | 'if' expression statement_list 'end'
//!                  | 'while' expression statement_list 'end'
//! expression     ::= term (('>' | '<') expression)?
//! term           ::= factor (('+' | '-') term)?
//! factor         ::= atom (('*' | '/') factor)?
//! atom           ::= '(' expression ')' | variable | constant
//! variable       ::= [a-z]
//! constant       ::= [0-9]+
//! ```
//!
//! Whitespace (including newlines) is insignificant between tokens.
//!
//! # Parser Implementation
//!
//! Hand-written backtracking recursive descent parser with no separate
//! tokenization pass. No external parser generator dependencies.

pub mod ast;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use parse::{parse_program, ParseError, Parser, ParserConfig};
