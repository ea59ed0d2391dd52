//! Answer submission.
//!
//! `client.rs` talks to the verification endpoint; `retry.rs` holds the
//! backoff policy it uses for transient failures.

#[path = "verify/client.rs"]
mod client;
#[path = "verify/retry.rs"]
mod retry;

pub use client::{Verdict, VerificationClient};
pub use retry::RetryConfig;
