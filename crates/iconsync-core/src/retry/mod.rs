//! Retry and backoff policy for API calls.
//!
//! Classifies `ApiError`s (timeouts, throttling, connection failures, 5xx)
//! and applies capped exponential backoff, so every remote call in the
//! pipeline shares one policy.

mod classify;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::run_with_retry;
