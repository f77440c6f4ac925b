//! Research parameters: pipeline defaults.

use consensus_domain::{AdapterId, DEFAULT_DEPTH, DEFAULT_LANGUAGE};
use serde::{Deserialize, Serialize};

/// Research pipeline parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchParams {
    /// Adapter asked for the research plan (default: best fit for the language)
    pub planning_adapter: Option<AdapterId>,
    /// Depth used when a request does not name one
    pub default_depth: usize,
    /// Language used when a request does not name one
    pub default_language: String,
    /// Translate step results when the request has a target language
    pub translate_steps: bool,
}

impl Default for ResearchParams {
    fn default() -> Self {
        Self {
            planning_adapter: None,
            default_depth: DEFAULT_DEPTH,
            default_language: DEFAULT_LANGUAGE.to_string(),
            translate_steps: true,
        }
    }
}

impl ResearchParams {
    pub fn with_planning_adapter(mut self, adapter: impl Into<AdapterId>) -> Self {
        self.planning_adapter = Some(adapter.into());
        self
    }

    pub fn with_default_depth(mut self, depth: usize) -> Self {
        self.default_depth = depth;
        self
    }

    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }

    pub fn without_translation(mut self) -> Self {
        self.translate_steps = false;
        self
    }
}
