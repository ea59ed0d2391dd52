extern crate self as moltsolve;

#[macro_use]
mod macros;
mod api;
mod config;
mod engine;
mod error;
pub mod logging;
mod rules;
mod verify;

pub use api::{
    Answer, Challenge, NumberSource, NumberToken, Operation, Options, ParseDetails, ParseResultVerbose, StageTimings,
    TokenSummary, parse, parse_verbose_with, parse_with, solve, solve_with,
};
pub use config::{API_KEY_ENV, API_URL_ENV, Config, DEFAULT_API_BASE, DEFAULT_TIMEOUT};
pub use error::{SolveError, SubmissionError};
pub use verify::{RetryConfig, Verdict, VerificationClient};

use crate::engine::CueMask;

// --- Internal types ---------------------------------------------------------

/// Byte span into the raw challenge text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub(crate) fn new(start: usize, end: usize) -> Self {
        Range { start, end }
    }

    pub(crate) fn contains(&self, other: &Range) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

/// A number piece recovered from one or more fragments, before composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NumeralData {
    pub value: i64,
    /// Power-of-ten grain (`20` -> 1, `100` -> 2). `None` when the value has
    /// no trailing zero.
    pub grain: Option<u32>,
    /// Only magnitude words (`hundred`, `thousand`) multiply what precedes them.
    pub multipliable: bool,
    /// Spelled out as words rather than written as a digit literal.
    pub spelled: bool,
}

/// Joins two adjacent numeral pieces into one value.
///
/// `left` sees the value accumulated so far, `right` the next piece. Rules are
/// tried in order and the first production returning `Some` wins.
pub(crate) struct ComposeRule {
    pub name: &'static str,
    pub left: fn(&NumeralData) -> bool,
    pub right: fn(&NumeralData) -> bool,
    /// Both pieces must come from the same raw word (`Twenty5`, `5Ten`).
    pub glued: bool,
    pub production: fn(&NumeralData, &NumeralData) -> Option<NumeralData>,
}

impl std::fmt::Debug for ComposeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposeRule")
            .field("name", &self.name)
            .field("glued", &self.glued)
            .field("production", &"<function>")
            .finish()
    }
}

/// One operation precedence rule. The rule fires when the scanned cue set
/// holds every flag in `all` and, if `any` is non-empty, at least one flag of
/// `any`. Lower ranks win.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CueRule {
    pub name: &'static str,
    pub rank: u8,
    pub all: CueMask,
    pub any: CueMask,
    pub operation: Operation,
}

impl CueRule {
    pub(crate) fn matches(&self, mask: CueMask) -> bool {
        mask.contains(self.all) && (self.any.is_empty() || mask.intersects(self.any))
    }
}
