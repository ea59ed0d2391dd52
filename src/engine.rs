//! Decoding engine.
//!
//! Turning a scrambled challenge into an answer is a pipeline of pure stages.
//! Each stage lives in its own submodule under `src/engine/`:
//!
//! ```text
//! raw text
//!    │  normalize            (normalize.rs)
//!    │    - words = ASCII alphanumeric runs, lowercased, with raw spans
//!    │    - angle-bracket groups remembered, all brackets dropped
//!    │    - `+`/`-` kept only when glued to a number
//!    v
//! NormalizedText ──────────────┬───────────────────────────────┐
//!                              │ lex                (lexer.rs) │ lex
//!                              v                               v
//!                    extract (extract.rs)            scan (trigger.rs)
//!                      - numeral pieces                - cue flags + spans
//!                      - compose rules                 classify (classify.rs)
//!                      - bracket cipher                  - precedence rules
//!                              │                               │
//!                              └──────────────┬────────────────┘
//!                                             v
//!                                   pipeline (pipeline.rs)
//!                                     - flag rate figures
//!                                     - evaluate (evaluate.rs)
//!                                             │
//!                                             v
//!                                           Answer
//! ```
//!
//! Nothing here performs I/O or keeps state between runs: the dictionaries
//! and rule tables in `src/rules/**` are immutable statics, and every stage
//! takes its input by reference and returns a fresh value. The same input
//! always yields the same output.
//!
//! ## Responsibilities by module
//!
//! - `normalize.rs`: noise removal, case folding, glyph adjacency.
//! - `lexer.rs`: splits words into letter/digit fragments and matches
//!   dictionary words across noise-split fragments (longest match first).
//! - `extract.rs`: composes adjacent numeral lexemes into `NumberToken`s.
//! - `trigger.rs`: collects operation cues into a `CueMask`.
//! - `classify.rs`: applies the ranked cue rules to pick one `Operation`.
//! - `evaluate.rs`: folds operands with the operation.
//! - `pipeline.rs`: runs the stages and records `StageMetrics`.
//! - `metrics.rs`: per-stage timings.
//!
//! ## Debugging
//!
//! Every stage emits `tracing` events at `debug` level; run the binary with
//! `MOLTSOLVE_LOG=debug` to see them.

#[path = "engine/classify.rs"]
mod classify;
#[path = "engine/evaluate.rs"]
mod evaluate;
#[path = "engine/extract.rs"]
mod extract;
#[path = "engine/lexer.rs"]
mod lexer;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/pipeline.rs"]
mod pipeline;
#[path = "engine/trigger.rs"]
mod trigger;

pub(crate) use classify::{Classification, classify};
pub(crate) use evaluate::evaluate;
pub(crate) use extract::extract;
pub(crate) use lexer::{LexemeKind, lex};
pub(crate) use metrics::StageMetrics;
pub(crate) use normalize::{NormKind, NormToken, NormalizedText, Sign, normalize};
pub(crate) use pipeline::{RunResult, run};
pub use trigger::CueMask;
pub(crate) use trigger::CueScan;
