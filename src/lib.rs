//! # Introduction
//!
//! deadstore parses programs in a tiny imperative language (assignments, `if`
//! and `while` over integer expressions) and reports *dead stores*: writes to
//! a variable whose value is never read before it is overwritten or the
//! program ends.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Parser → AST → Analyzer → Unused assignments → Report
//! ```
//!
//! 1. [`parser`] — backtracking recursive descent parser building the AST.
//! 2. [`analyzer`] — single-pass, loop-aware dead-store analysis.
//! 3. [`printer`] — renders the AST back to indented text.
//! 4. [`ui`] — crossterm-colored report used by the `deadstore` binary.
//!
//! ## Example
//!
//! ```
//! use deadstore::analyzer::find_unused_assignments;
//! use deadstore::parser::parse_program;
//!
//! let program = parse_program("a = 1 a = 2 b = a").unwrap();
//! let unused = find_unused_assignments(&program);
//! let unused: Vec<String> = unused.iter().map(|a| a.to_string()).collect();
//! assert_eq!(unused, ["a = 1", "b = a"]);
//! ```

pub mod analyzer;
pub mod parser;
pub mod printer;
pub mod ui;
