//! Bounded retry with exponential backoff for adapter calls.

use crate::config::RetryPolicy;
use crate::ports::model_adapter::{AdapterError, AdapterFailure, ModelAdapter};
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Run `operation` until it succeeds or the policy's attempts are exhausted.
///
/// Non-retryable errors are returned immediately. The last error is
/// returned once every attempt has failed.
pub async fn with_retry<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T, AdapterError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, AdapterError>>,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => {
                if !e.is_retryable() || attempt >= attempts {
                    return Err(e);
                }
                let backoff = policy.delay_after(attempt);
                warn!(
                    attempt,
                    max = attempts,
                    backoff_ms = backoff.as_millis() as u64,
                    error = %e,
                    "Retrying adapter call"
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
        }
    }
}

/// One adapter call bounded by `timeout`
pub async fn invoke_with_timeout(
    adapter: &dyn ModelAdapter,
    prompt: &str,
    language: &str,
    timeout: Option<Duration>,
) -> Result<String, AdapterError> {
    let call = adapter.invoke(prompt, language);
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, call).await {
            Ok(result) => result,
            Err(_) => Err(AdapterError::new(
                adapter.profile().provider.clone(),
                AdapterFailure::Timeout(limit.as_secs()),
            )),
        },
        None => call.await,
    }
}

/// Adapter call with both the retry policy and the per-attempt timeout applied
pub async fn invoke_with_retry(
    adapter: &dyn ModelAdapter,
    prompt: &str,
    language: &str,
    policy: &RetryPolicy,
    timeout: Option<Duration>,
) -> Result<String, AdapterError> {
    with_retry(policy, || invoke_with_timeout(adapter, prompt, language, timeout)).await
}
