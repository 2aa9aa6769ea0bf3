//! Dead-store analysis
//!
//! This module finds assignments whose value is never read:
//! - [`engine`]: the [`Analyzer`] and its result set
//! - `loops`: loop frame bookkeeping for `while` back-edges
//!
//! # Model
//!
//! The analyzer walks the program once, in source order. It remembers the most
//! recent unread write of every variable (its *pending* assignment). A read
//! retires the pending write; a second write flags the first one as unused;
//! anything still pending at the end of the program is flagged too.
//!
//! Loop bodies are scanned only once. To account for the next iteration, each
//! open `while` records whether a variable's first mention inside it was a
//! read. If so, a later iteration may read a value written before the loop or
//! late in its body, so the pending write of that variable is cleared when the
//! loop closes. This can miss some dead writes but does not flag writes that a
//! further iteration would read.

pub mod engine;
mod loops;

pub use engine::{find_unused_assignments, Analyzer, UnusedAssignments};
