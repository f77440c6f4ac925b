//! Shared HTTP plumbing for the provider adapters

use consensus_application::{AdapterError, AdapterFailure};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Upper bound of one HTTP exchange
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Longest error body kept in an [`AdapterFailure::Status`]
const MAX_ERROR_BODY: usize = 500;

/// HTTP client with the adapter timeouts applied
pub fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// API key from the configured value or environment variable
pub fn resolve_api_key(direct: Option<&str>, env_var: &str) -> Option<String> {
    direct
        .map(str::to_string)
        .or_else(|| std::env::var(env_var).ok())
        .filter(|key| !key.trim().is_empty())
}

/// Send a JSON request and return the parsed JSON body of a 2xx response
///
/// `timeout` is the one the client was built with; it is reported back in
/// [`AdapterFailure::Timeout`].
pub async fn send_json(
    provider: &str,
    request: RequestBuilder,
    body: &Value,
    timeout: Duration,
) -> Result<Value, AdapterError> {
    let response = request
        .header("content-type", "application/json; charset=utf-8")
        .json(body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AdapterError::new(provider, AdapterFailure::Timeout(timeout.as_secs()))
            } else {
                AdapterError::transport(provider, e.to_string())
            }
        })?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AdapterError::transport(provider, format!("failed to read body: {}", e)))?;
    debug!(provider, status = status.as_u16(), bytes = text.len(), "Provider responded");

    if !status.is_success() {
        return Err(AdapterError::new(
            provider,
            AdapterFailure::Status {
                status: status.as_u16(),
                body: truncate_body(&text),
            },
        ));
    }

    serde_json::from_str(&text)
        .map_err(|e| AdapterError::payload(provider, format!("invalid JSON: {}", e)))
}

fn truncate_body(text: &str) -> String {
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

/// Text at `pointer`, or a payload error naming what was missing
pub fn extract_text(provider: &str, reply: &Value, pointer: &str) -> Result<String, AdapterError> {
    reply
        .pointer(pointer)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| AdapterError::payload(provider, format!("missing {}", pointer)))
}
