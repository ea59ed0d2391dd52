//! Engine run metrics.
//!
//! Timings are collected on every run; they cost a handful of `Instant::now`
//! calls. `parse_verbose_with` surfaces them, the plain entry points drop
//! them.

use std::time::{Duration, Instant};

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StageMetrics {
    /// Total elapsed time for the run.
    pub total: Duration,
    pub normalize: Duration,
    pub extract: Duration,
    pub classify: Duration,
    pub evaluate: Duration,
}

/// Run `f` and return its output with the elapsed time.
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}
