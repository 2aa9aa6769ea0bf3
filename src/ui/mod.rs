//! Terminal output built on [crossterm](https://github.com/crossterm-rs/crossterm).
//!
//! - **[`report`]** — renders the parsed program and the analysis result
//! - **[`theme`]** — centralized color palette
//!
//! Colors are optional: with color disabled the report is plain text, suitable
//! for pipes and golden-file tests.

pub mod report;
pub mod theme;

pub use report::Report;
