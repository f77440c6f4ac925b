//! Consensus parameters: engine tuning.
//!
//! [`ConsensusParams`] groups the static parameters that control
//! [`ConsensusEngine`](crate::use_cases::resolve_consensus::ConsensusEngine):
//! scoring weights, the near-tie threshold, retry policy and call timeout.

use consensus_domain::{AdapterId, DEFAULT_NEAR_TIE_THRESHOLD, DomainError, ScoreWeights};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry policy for a single adapter call.
///
/// `max_attempts` counts the first call; the delay before retry `n`
/// (1-based) is `initial_delay * multiplier^(n-1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Delay before the retry following failed attempt `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1) as i32;
        self.initial_delay.mul_f64(self.multiplier.max(1.0).powi(exponent))
    }
}

/// Consensus engine parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusParams {
    pub weights: ScoreWeights,
    /// Top-two score gap under which responses are merged
    pub near_tie_threshold: f64,
    pub retry: RetryPolicy,
    /// Upper bound of a single adapter call (per attempt)
    pub call_timeout: Option<Duration>,
    /// Adapter asked to reconcile near-tied responses (default: the top-ranked one)
    pub merge_adapter: Option<AdapterId>,
}

impl Default for ConsensusParams {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            near_tie_threshold: DEFAULT_NEAR_TIE_THRESHOLD,
            retry: RetryPolicy::default(),
            call_timeout: Some(Duration::from_secs(30)),
            merge_adapter: None,
        }
    }
}

impl ConsensusParams {
    // ==================== Builder Methods ====================

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_near_tie_threshold(mut self, threshold: f64) -> Self {
        self.near_tie_threshold = threshold;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_merge_adapter(mut self, adapter: impl Into<AdapterId>) -> Self {
        self.merge_adapter = Some(adapter.into());
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        self.weights.validate()?;
        if !(self.near_tie_threshold.is_finite() && self.near_tie_threshold >= 0.0) {
            return Err(DomainError::InvalidWeights(format!(
                "near-tie threshold must be non-negative, got {}",
                self.near_tie_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ConsensusParams::default();
        assert_eq!(params.near_tie_threshold, 0.1);
        assert_eq!(params.retry.max_attempts, 3);
        assert_eq!(params.call_timeout, Some(Duration::from_secs(30)));
        assert!(params.merge_adapter.is_none());
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_backoff_doubles() {
        let retry = RetryPolicy::default();
        assert_eq!(retry.delay_after(1), Duration::from_secs(1));
        assert_eq!(retry.delay_after(2), Duration::from_secs(2));
        assert_eq!(retry.delay_after(3), Duration::from_secs(4));
    }

    #[test]
    fn test_builder() {
        let params = ConsensusParams::default()
            .with_near_tie_threshold(0.2)
            .with_retry(RetryPolicy::none())
            .with_merge_adapter("claude");
        assert_eq!(params.near_tie_threshold, 0.2);
        assert_eq!(params.retry.max_attempts, 1);
        assert_eq!(params.merge_adapter, Some(AdapterId::from("claude")));
    }

    #[test]
    fn test_validate_rejects_bad_threshold() {
        let params = ConsensusParams::default().with_near_tie_threshold(-1.0);
        assert!(params.validate().is_err());
    }
}
