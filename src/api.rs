use crate::engine::{self, NormKind};
use crate::{Range, SolveError};
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Arithmetic combinator selected for a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Add,
    Subtract,
    /// A rate statement plus a question for a total. Evaluates as `Add` over
    /// the asked-for quantities: the bracketed operands when there are at
    /// least two, otherwise every operand that is not a rate figure.
    Rate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Add => "ADD",
            Operation::Subtract => "SUBTRACT",
            Operation::Rate => "RATE",
        })
    }
}

/// How an operand was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberSource {
    /// Digit literal (`17`).
    Digits,
    /// Number words (`TwEnTy FiVe`).
    Words,
    /// Words and digits glued together (`Twenty5`).
    Mixed,
    /// Angle-bracket cipher group (`<GaAiInSs>`).
    Cipher,
}

/// One operand recovered from the challenge.
///
/// `range` is a byte span into the raw input; `body` is that slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberToken {
    /// Ordinal of appearance, starting at 0.
    pub position: usize,
    pub value: i64,
    pub range: Range,
    pub body: String,
    pub source: NumberSource,
    /// Written inside an angle-bracket group (`<twenty five>`).
    pub bracketed: bool,
    /// Rate statement figure or other context; skipped when the operation is
    /// `Rate`.
    pub rate_figure: bool,
}

/// The integer result of a challenge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Answer(i64);

impl Answer {
    pub(crate) fn new(value: i64) -> Self {
        Answer(value)
    }

    pub fn value(self) -> i64 {
        self.0
    }

    /// The form the verification service expects: two decimals (`"40.00"`).
    pub fn to_submission(self) -> String {
        format!("{}.00", self.0)
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded challenge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Challenge {
    /// The untouched input.
    pub raw: String,
    /// Canonical normalized rendering.
    pub normalized: String,
    /// Operands in order of appearance.
    pub numbers: Vec<NumberToken>,
    pub operation: Operation,
    /// Name of the precedence rule that picked `operation`.
    pub rule: String,
    answer: Answer,
}

impl Challenge {
    pub fn answer(&self) -> Answer {
        self.answer
    }
}

/// Options that affect decoding.
#[derive(Debug, Clone)]
pub struct Options {
    /// Maximum number of noise-split fragments joined into one dictionary word
    /// (`s e v e n` is five fragments).
    pub max_fragment_span: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self { max_fragment_span: 6 }
    }
}

/// Per-stage timings of one decoding run.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StageTimings {
    pub total: Duration,
    pub normalize: Duration,
    pub extract: Duration,
    pub classify: Duration,
    pub evaluate: Duration,
}

/// A normalized token, for inspection.
#[derive(Debug, Clone, Serialize)]
pub struct TokenSummary {
    /// Normalized word, or the glyph character.
    pub text: String,
    pub range: Range,
    /// Index of the angle group the token sits in.
    pub group: Option<usize>,
}

/// Additional details returned by [`parse_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct ParseDetails {
    pub timings: StageTimings,
    pub tokens: Vec<TokenSummary>,
    /// Spans of the operation cues found, in order.
    pub cues: Vec<Range>,
}

/// Result from [`parse_verbose_with`].
#[derive(Debug, Clone, Serialize)]
pub struct ParseResultVerbose {
    pub challenge: Challenge,
    pub answer: Answer,
    pub details: ParseDetails,
}

/// Decode `text` with default [`Options`].
///
/// # Example
/// ```
/// use moltsolve::{Operation, parse};
///
/// let challenge = parse("TwEnTy FiVe plus Fifteen").unwrap();
/// assert_eq!(challenge.operation, Operation::Add);
/// assert_eq!(challenge.answer().value(), 40);
/// ```
pub fn parse(text: &str) -> Result<Challenge, SolveError> {
    parse_with(text, &Options::default())
}

/// Decode `text` with the provided `options`.
pub fn parse_with(text: &str, options: &Options) -> Result<Challenge, SolveError> {
    let run = engine::run(text, options)?;
    Ok(to_challenge(text, run))
}

/// Decode `text` and return only the answer.
pub fn solve(text: &str) -> Result<Answer, SolveError> {
    solve_with(text, &Options::default())
}

pub fn solve_with(text: &str, options: &Options) -> Result<Answer, SolveError> {
    Ok(engine::run(text, options)?.answer)
}

/// Decode `text` and keep stage timings and the normalized token stream.
pub fn parse_verbose_with(text: &str, options: &Options) -> Result<ParseResultVerbose, SolveError> {
    let run = engine::run(text, options)?;

    let m = run.metrics;
    let timings =
        StageTimings { total: m.total, normalize: m.normalize, extract: m.extract, classify: m.classify, evaluate: m.evaluate };
    let tokens = run.normalized.tokens().iter().map(summarize).collect();
    let cues = run.classification.scan.hits.iter().map(|hit| hit.range).collect();
    let answer = run.answer;

    Ok(ParseResultVerbose { challenge: to_challenge(text, run), answer, details: ParseDetails { timings, tokens, cues } })
}

fn to_challenge(text: &str, run: engine::RunResult) -> Challenge {
    Challenge {
        raw: text.to_string(),
        normalized: run.normalized.as_str().to_string(),
        numbers: run.tokens,
        operation: run.classification.operation,
        rule: run.classification.rule.to_string(),
        answer: run.answer,
    }
}

fn summarize(token: &engine::NormToken) -> TokenSummary {
    let text = match &token.kind {
        NormKind::Word(word) => word.clone(),
        NormKind::Glyph { sign, .. } => sign.as_char().to_string(),
    };
    TokenSummary { text, range: token.range, group: token.group }
}
