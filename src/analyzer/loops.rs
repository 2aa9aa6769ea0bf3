//! Loop handling (`while`).
//!
//! Adds `impl Analyzer` methods for `while` statements. Each open loop owns a
//! [`LoopFrame`] recording, per variable, whether its first mention inside the
//! loop (condition included) was a read or a write. Frames are pushed when a
//! loop is entered and folded into the enclosing scope when it is left.

use crate::analyzer::engine::Analyzer;
use crate::parser::ast::{Variable, While};
use rustc_hash::FxHashMap;
use tracing::trace;

/// How a variable was first mentioned inside a loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FirstMention {
    Read,
    Write,
}

/// First mentions of variables within one open loop
#[derive(Debug, Default)]
pub(crate) struct LoopFrame {
    first_mentions: FxHashMap<Variable, FirstMention>,
}

impl LoopFrame {
    /// Record `mention` unless `var` was already mentioned in this loop.
    fn record(&mut self, var: Variable, mention: FirstMention) {
        self.first_mentions.entry(var).or_insert(mention);
    }
}

impl<'a> Analyzer<'a> {
    /// Record a mention of `var` in the innermost open loop, if any.
    pub(crate) fn record_first_mention(&mut self, var: Variable, mention: FirstMention) {
        if let Some(frame) = self.loops.last_mut() {
            frame.record(var, mention);
        }
    }

    /// Analyze `while condition body end`.
    ///
    /// The body is scanned once. When the loop closes, every variable whose
    /// first mention in the loop was a read has its pending write retired,
    /// since another iteration would read it.
    pub(crate) fn analyze_while(&mut self, while_stmt: &'a While) {
        self.loops.push(LoopFrame::default());
        self.read(&while_stmt.condition);
        self.analyze_list(&while_stmt.body);

        let Some(frame) = self.loops.pop() else {
            return;
        };

        for (var, mention) in frame.first_mentions {
            // The enclosing loop sees this loop's mentions as its own
            self.record_first_mention(var, mention);

            if mention == FirstMention::Read {
                trace!(variable = %var, "read on loop entry, retiring pending write");
                self.retire(var);
            }
        }
    }
}
