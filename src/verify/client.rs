use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use serde::Serialize;
use serde_json::Value;

use super::retry::{RetryConfig, should_retry};
use crate::{Answer, Config, SubmissionError};

/// Accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Server-provided message, if any.
    pub message: Option<String>,
    /// Number of requests sent, retries included.
    pub attempts: u32,
}

#[derive(Debug, Serialize)]
struct VerifyRequest<'a> {
    verification_code: &'a str,
    answer: String,
}

/// HTTP client for the verification endpoint.
#[derive(Debug, Clone)]
pub struct VerificationClient {
    http: reqwest::Client,
    api_base: String,
    api_key: Option<String>,
    retry: RetryConfig,
}

impl VerificationClient {
    pub fn new(config: &Config) -> Result<Self, SubmissionError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            api_key: config.api_key.clone(),
            retry: config.retry.clone(),
        })
    }

    /// `{api_base}/verify`.
    pub fn endpoint(&self) -> String {
        format!("{}/verify", self.api_base.trim_end_matches('/'))
    }

    /// Submit `answer` for `code`.
    ///
    /// Fails with `MissingCredential` before any I/O when no key is configured.
    /// Transient failures are retried per the configured `RetryConfig`.
    pub async fn submit(&self, code: &str, answer: Answer) -> Result<Verdict, SubmissionError> {
        let key = self.api_key.as_deref().ok_or(SubmissionError::MissingCredential)?;
        let request = VerifyRequest { verification_code: code, answer: answer.to_submission() };

        let mut attempt = 0;
        loop {
            match self.send_once(key, &request).await {
                Ok(message) => {
                    tracing::info!(code, answer = %request.answer, attempts = attempt + 1, "answer accepted");
                    return Ok(Verdict { message, attempts: attempt + 1 });
                }
                Err(e) => {
                    if !should_retry(&e) || attempt >= self.retry.max_retries {
                        tracing::info!(code, answer = %request.answer, error = %e, "submission failed");
                        return Err(e);
                    }

                    let delay = self.retry.delay_for_attempt(attempt, e.retry_after());
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.retry.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Retrying submission after error: {}",
                        e
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    async fn send_once(&self, key: &str, request: &VerifyRequest<'_>) -> Result<Option<String>, SubmissionError> {
        let response = self.http.post(self.endpoint()).bearer_auth(key).json(request).send().await?;

        let status = response.status().as_u16();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        let body = response.text().await?;

        tracing::debug!(status, body = %body, "verification response");
        interpret(status, &body, retry_after)
    }
}

/// Map a response to the accepted message or a `SubmissionError`.
fn interpret(status: u16, body: &str, retry_after: Option<Duration>) -> Result<Option<String>, SubmissionError> {
    let json: Option<Value> = serde_json::from_str(body).ok();
    let message = json.as_ref().and_then(server_message);

    if !(200..300).contains(&status) {
        let message = message.unwrap_or_else(|| body.chars().take(200).collect());
        return Err(SubmissionError::Status { status, message, retry_after });
    }

    let Some(json) = json else {
        return Err(SubmissionError::InvalidResponse(format!("body is not JSON: {}", body.chars().take(200).collect::<String>())));
    };

    let success = json.get("success").and_then(Value::as_bool);
    let rejected = match success {
        Some(ok) => !ok,
        None => json.get("error").is_some(),
    };
    if rejected {
        return Err(SubmissionError::Rejected { message: message.unwrap_or_else(|| "no reason given".to_string()) });
    }

    Ok(message)
}

fn server_message(json: &Value) -> Option<String> {
    ["message", "error", "hint"].iter().find_map(|key| json.get(*key).and_then(Value::as_str)).map(str::to_string)
}
