//! Consensus value objects - the per-step results of the consensus engine.
//!
//! - [`AdapterResponse`] - one adapter's answer (or failure) for one step
//! - [`ConsensusMethod`] - how the final text was chosen
//! - [`ConsensusResult`] - the reconciled answer for one step

use crate::core::adapter::AdapterId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Response from a single adapter for one prompt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterResponse {
    /// The adapter that generated this response
    pub adapter: AdapterId,
    /// The response content (empty on failure)
    pub content: String,
    /// Whether this response was successful
    pub success: bool,
    /// Error message if failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock time of completion (milliseconds since epoch)
    pub timestamp: u64,
    /// Language the adapter was asked to answer in
    pub language: String,
}

impl AdapterResponse {
    /// Creates a successful response from an adapter.
    pub fn success(
        adapter: impl Into<AdapterId>,
        content: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            adapter: adapter.into(),
            content: content.into(),
            success: true,
            error: None,
            timestamp: current_timestamp(),
            language: language.into(),
        }
    }

    /// Creates a failed response indicating the adapter could not answer.
    pub fn failure(
        adapter: impl Into<AdapterId>,
        error: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            adapter: adapter.into(),
            content: String::new(),
            success: false,
            error: Some(error.into()),
            timestamp: current_timestamp(),
            language: language.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

/// How the consensus text was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsensusMethod {
    /// Only one adapter answered; its text is used verbatim
    Single,
    /// The highest-scored answer won outright
    BestScore,
    /// The top two answers were near-tied and reconciled into one text
    MergedConsensus,
}

impl ConsensusMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsensusMethod::Single => "single",
            ConsensusMethod::BestScore => "best_score",
            ConsensusMethod::MergedConsensus => "merged_consensus",
        }
    }
}

impl std::fmt::Display for ConsensusMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Reconciled answer for one step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// Selected or merged text
    pub content: String,
    /// Highest-ranked adapter
    pub primary: AdapterId,
    /// Runner-up adapter when the result was merged
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary: Option<AdapterId>,
    /// Score of the primary adapter (0.0 for single-response results)
    pub score: f64,
    /// Score of every surviving adapter
    pub scores: BTreeMap<AdapterId, f64>,
    pub method: ConsensusMethod,
    pub language: String,
    /// Translation of `content` into the run's target language
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
}

impl ConsensusResult {
    /// Trivial consensus: exactly one adapter answered.
    pub fn single(response: &AdapterResponse) -> Self {
        Self {
            content: response.content.clone(),
            primary: response.adapter.clone(),
            secondary: None,
            score: 0.0,
            scores: BTreeMap::new(),
            method: ConsensusMethod::Single,
            language: response.language.clone(),
            translated_content: None,
            target_language: None,
        }
    }

    /// Attach a translation of the content.
    pub fn with_translation(
        mut self,
        translated: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        self.translated_content = Some(translated.into());
        self.target_language = Some(target_language.into());
        self
    }

    /// Text to present to readers of the target language
    pub fn display_content(&self) -> &str {
        self.translated_content.as_deref().unwrap_or(&self.content)
    }

    pub fn is_merged(&self) -> bool {
        self.method == ConsensusMethod::MergedConsensus
    }
}

/// Get current timestamp in milliseconds
pub(crate) fn current_timestamp() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
