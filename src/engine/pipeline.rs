use std::time::Instant;

use crate::engine::metrics::timed;
use crate::engine::{Classification, CueMask, NormalizedText, StageMetrics, classify, evaluate, extract, normalize};
use crate::{Answer, NumberToken, Operation, Options, Range, SolveError};

/// Everything one decoding run produced.
#[derive(Debug, Clone)]
pub(crate) struct RunResult {
    pub normalized: NormalizedText,
    pub tokens: Vec<NumberToken>,
    pub classification: Classification,
    pub answer: Answer,
    pub metrics: StageMetrics,
}

/// Decode `raw` end to end.
pub(crate) fn run(raw: &str, options: &Options) -> Result<RunResult, SolveError> {
    let started = Instant::now();
    let mut metrics = StageMetrics::default();

    let (normalized, elapsed) = timed(|| normalize(raw));
    metrics.normalize = elapsed;
    let normalized = normalized?;

    let (tokens, elapsed) = timed(|| extract(&normalized, options.max_fragment_span));
    metrics.extract = elapsed;
    let mut tokens = tokens?;

    let (classification, elapsed) = timed(|| classify(&normalized, options.max_fragment_span));
    metrics.classify = elapsed;
    let classification = classification?;

    if classification.operation == Operation::Rate {
        if tokens.iter().filter(|t| t.bracketed).count() >= 2 {
            flag_unbracketed(&mut tokens);
        } else if let Some(hit) = classification.scan.first(CueMask::RATE_WORD) {
            flag_rate_figures(raw, &mut tokens, hit.range);
        }
        let remaining = tokens.iter().filter(|t| !t.rate_figure).count();
        if remaining < 2 {
            return Err(SolveError::NoOperandsFound { found: remaining, text: normalized.as_str().to_string() });
        }
    }

    let (answer, elapsed) = timed(|| evaluate(&tokens, Some(classification.operation)));
    metrics.evaluate = elapsed;
    let answer = answer?;

    metrics.total = started.elapsed();
    Ok(RunResult { normalized, tokens, classification, answer, metrics })
}

/// Bracketed quantities are the ones a total question asks about. Everything
/// else is context.
fn flag_unbracketed(tokens: &mut [NumberToken]) {
    for token in tokens.iter_mut().filter(|t| !t.bracketed) {
        token.rate_figure = true;
    }
}

/// Mark the figures of a rate statement: the nearest operand before the rate
/// word and an operand that directly follows it (`ten per 5 seconds`).
fn flag_rate_figures(raw: &str, tokens: &mut [NumberToken], rate: Range) {
    if let Some(before) = tokens.iter_mut().rev().find(|t| t.range.end <= rate.start) {
        before.rate_figure = true;
    }
    if let Some(after) = tokens.iter_mut().find(|t| t.range.start >= rate.end) {
        let gap = &raw[rate.end..after.range.start];
        if !gap.bytes().any(|b| b.is_ascii_alphanumeric()) {
            after.rate_figure = true;
        }
    }
}
