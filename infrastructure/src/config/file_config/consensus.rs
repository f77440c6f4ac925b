//! Consensus configuration from TOML (`[consensus]` section)

use super::{ConfigIssue, Severity};
use consensus_application::{ConsensusParams, RetryPolicy};
use consensus_domain::{AdapterId, DEFAULT_NEAR_TIE_THRESHOLD, ScoreWeights};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw consensus configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Weights of the five scoring signals (must sum to 1.0)
    pub weights: ScoreWeights,
    /// Top-two score gap under which responses are merged
    pub near_tie_threshold: f64,
    /// Per-call timeout in seconds (0 disables the timeout)
    pub timeout_seconds: u64,
    /// Attempts per adapter call, including the first
    pub max_attempts: u32,
    /// Delay before the first retry, in milliseconds
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    /// Adapter asked to merge near-tied responses (default: top-ranked)
    pub merge_adapter: Option<String>,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            near_tie_threshold: DEFAULT_NEAR_TIE_THRESHOLD,
            timeout_seconds: 30,
            max_attempts: 3,
            initial_backoff_ms: 1000,
            backoff_multiplier: 2.0,
            merge_adapter: None,
        }
    }
}

impl FileConsensusConfig {
    /// Convert to engine parameters, reporting anything that had to be corrected
    pub fn to_params(&self) -> (ConsensusParams, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let defaults = ConsensusParams::default();

        let weights = match self.weights.validate() {
            Ok(()) => self.weights,
            Err(e) => {
                issues.push(ConfigIssue::new(
                    Severity::Error,
                    "consensus.weights",
                    format!("{}, using the default weights", e),
                ));
                defaults.weights
            }
        };

        let threshold = if self.near_tie_threshold.is_finite() && self.near_tie_threshold >= 0.0 {
            self.near_tie_threshold
        } else {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "consensus.near_tie_threshold",
                format!(
                    "must be non-negative, got {}; using {}",
                    self.near_tie_threshold, DEFAULT_NEAR_TIE_THRESHOLD
                ),
            ));
            DEFAULT_NEAR_TIE_THRESHOLD
        };

        if self.max_attempts == 0 {
            issues.push(ConfigIssue::new(
                Severity::Warning,
                "consensus.max_attempts",
                "0 attempts is not possible; making a single attempt".to_string(),
            ));
        }
        let mut retry = RetryPolicy::default()
            .with_max_attempts(self.max_attempts)
            .with_initial_delay(Duration::from_millis(self.initial_backoff_ms));
        retry.multiplier = self.backoff_multiplier;

        let call_timeout = match self.timeout_seconds {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        let mut params = defaults
            .with_weights(weights)
            .with_near_tie_threshold(threshold)
            .with_retry(retry)
            .with_call_timeout(call_timeout);
        params.merge_adapter = self.merge_adapter.as_deref().map(AdapterId::from);

        (params, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_converts_cleanly() {
        let (params, issues) = FileConsensusConfig::default().to_params();
        assert!(issues.is_empty());
        assert_eq!(params.near_tie_threshold, 0.1);
        assert_eq!(params.retry, RetryPolicy::default());
        assert_eq!(params.call_timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_bad_weights_fall_back_to_defaults() {
        let config = FileConsensusConfig {
            weights: ScoreWeights {
                base: 0.9,
                ..ScoreWeights::default()
            },
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.weights, ScoreWeights::default());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn test_zero_timeout_disables_it() {
        let config = FileConsensusConfig {
            timeout_seconds: 0,
            merge_adapter: Some("claude".to_string()),
            ..Default::default()
        };
        let (params, _) = config.to_params();
        assert!(params.call_timeout.is_none());
        assert_eq!(params.merge_adapter, Some(AdapterId::from("claude")));
    }
}
