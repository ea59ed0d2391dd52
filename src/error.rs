use std::time::Duration;

use thiserror::Error;

/// Why a challenge could not be decoded.
///
/// Decoding is deterministic, so none of these are worth retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("challenge is malformed: too little text left after normalization ({text:?})")]
    MalformedChallenge { text: String },

    #[error("expected at least two operands, found {found} in {text:?}")]
    NoOperandsFound { found: usize, text: String },

    #[error("cannot pick an operation: {reason} in {text:?}")]
    AmbiguousOperation { reason: String, text: String },

    // Internal invariant violations.
    #[error("evaluation failed: {reason}")]
    Evaluation { reason: String },
}

impl SolveError {
    /// Stable identifier used in reports and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            SolveError::MalformedChallenge { .. } => "MalformedChallengeError",
            SolveError::NoOperandsFound { .. } => "NoOperandsFoundError",
            SolveError::AmbiguousOperation { .. } => "AmbiguousOperationError",
            SolveError::Evaluation { .. } => "EvaluationError",
        }
    }

    /// The normalized text the failing stage looked at, when it had one.
    pub fn normalized_text(&self) -> Option<&str> {
        match self {
            SolveError::MalformedChallenge { text }
            | SolveError::NoOperandsFound { text, .. }
            | SolveError::AmbiguousOperation { text, .. } => Some(text),
            SolveError::Evaluation { .. } => None,
        }
    }
}

/// Why an answer could not be submitted.
#[derive(Error, Debug)]
pub enum SubmissionError {
    #[error("no API key configured; pass --api-key or set MOLTBOOK_API_KEY")]
    MissingCredential,

    #[error("request to verification endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("verification endpoint returned {status}: {message}")]
    Status {
        status: u16,
        message: String,
        /// Server hint from a `Retry-After` header.
        retry_after: Option<Duration>,
    },

    #[error("answer rejected: {message}")]
    Rejected { message: String },

    #[error("unexpected response from verification endpoint: {0}")]
    InvalidResponse(String),
}

impl SubmissionError {
    /// Rate limits, server errors, timeouts and connection failures are
    /// transient. Rejections and other client errors are final.
    pub fn is_retriable(&self) -> bool {
        match self {
            SubmissionError::Transport(err) => err.is_timeout() || err.is_connect(),
            SubmissionError::Status { status, .. } => *status == 429 || (500..600).contains(status),
            SubmissionError::MissingCredential
            | SubmissionError::Rejected { .. }
            | SubmissionError::InvalidResponse(_) => false,
        }
    }

    pub(crate) fn retry_after(&self) -> Option<Duration> {
        match self {
            SubmissionError::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> SubmissionError {
        SubmissionError::Status { status: code, message: String::new(), retry_after: None }
    }

    #[test]
    fn kinds_are_stable() {
        let text = String::from("x");
        assert_eq!(SolveError::MalformedChallenge { text: text.clone() }.kind(), "MalformedChallengeError");
        assert_eq!(SolveError::NoOperandsFound { found: 0, text: text.clone() }.kind(), "NoOperandsFoundError");
        assert_eq!(
            SolveError::AmbiguousOperation { reason: String::new(), text }.kind(),
            "AmbiguousOperationError"
        );
        assert_eq!(SolveError::Evaluation { reason: String::new() }.kind(), "EvaluationError");
    }

    #[test]
    fn retriable_statuses() {
        assert!(status(429).is_retriable());
        assert!(status(500).is_retriable());
        assert!(status(503).is_retriable());
        assert!(!status(400).is_retriable());
        assert!(!status(401).is_retriable());
        assert!(!status(404).is_retriable());
    }

    #[test]
    fn rejections_are_final() {
        assert!(!SubmissionError::Rejected { message: "wrong".into() }.is_retriable());
        assert!(!SubmissionError::MissingCredential.is_retriable());
        assert!(!SubmissionError::InvalidResponse("garbage".into()).is_retriable());
    }

    #[test]
    fn retry_after_comes_from_status_errors() {
        let err =
            SubmissionError::Status { status: 429, message: String::new(), retry_after: Some(Duration::from_secs(2)) };
        assert_eq!(err.retry_after(), Some(Duration::from_secs(2)));
        assert_eq!(status(500).retry_after(), None);
    }
}
