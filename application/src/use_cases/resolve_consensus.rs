//! Resolve Consensus use case
//!
//! Fans a prompt out to several adapters, scores the answers against each
//! other and returns one reconciled [`ConsensusResult`].

use crate::config::ConsensusParams;
use crate::ports::feedback_store::FeedbackStore;
use crate::ports::localization::{Localizer, keys};
use crate::ports::model_adapter::{AdapterRegistry, ModelAdapter};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::retry::invoke_with_retry;
use consensus_domain::{
    AdapterId, AdapterProfile, AdapterResponse, ConsensusMethod, ConsensusResult, DomainError,
    PromptCategory, PromptTemplate, ScoringContext, Selection, SimilarityMatrix, UserWeights,
    order_by_language_fitness, rank, score_response, select,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur while resolving consensus
#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error("No adapters selected")]
    NoAdapters,

    #[error("Unknown adapter: {0}")]
    UnknownAdapter(AdapterId),

    /// Every adapter failed; carries the localized message and the per-adapter errors
    #[error("{message}")]
    NoValidResponses {
        message: String,
        failures: Vec<(AdapterId, String)>,
    },

    #[error("Invalid consensus parameters: {0}")]
    InvalidParams(#[from] DomainError),
}

/// Input for one consensus round
#[derive(Debug, Clone)]
pub struct ResolveInput {
    pub prompt: String,
    pub adapters: Vec<AdapterId>,
    pub language: String,
    /// User whose feedback weights apply
    pub user: Option<String>,
}

impl ResolveInput {
    pub fn new(
        prompt: impl Into<String>,
        adapters: Vec<AdapterId>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            adapters,
            language: language.into(),
            user: None,
        }
    }

    pub fn with_user(mut self, user: Option<String>) -> Self {
        self.user = user;
        self
    }
}

/// Multi-adapter consensus engine
pub struct ConsensusEngine {
    adapters: Arc<AdapterRegistry>,
    localizer: Arc<dyn Localizer>,
    feedback: Option<Arc<dyn FeedbackStore>>,
    params: ConsensusParams,
}

impl ConsensusEngine {
    pub fn new(adapters: Arc<AdapterRegistry>, localizer: Arc<dyn Localizer>) -> Self {
        Self {
            adapters,
            localizer,
            feedback: None,
            params: ConsensusParams::default(),
        }
    }

    pub fn with_feedback(mut self, feedback: Arc<dyn FeedbackStore>) -> Self {
        self.feedback = Some(feedback);
        self
    }

    pub fn with_params(mut self, params: ConsensusParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &ConsensusParams {
        &self.params
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Resolve with default (no-op) progress
    pub async fn resolve(&self, input: ResolveInput) -> Result<ConsensusResult, ConsensusError> {
        self.resolve_with_progress(input, &NoProgress).await
    }

    /// Resolve with progress callbacks for each adapter answer
    pub async fn resolve_with_progress(
        &self,
        input: ResolveInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<ConsensusResult, ConsensusError> {
        self.params.validate()?;
        let ordered = self.order_adapters(&input.adapters, &input.language)?;

        info!(
            adapters = ordered.len(),
            language = %input.language,
            "Resolving consensus"
        );

        let responses = self.query_all(&ordered, &input, progress).await;
        let successful: Vec<&AdapterResponse> = responses.iter().filter(|r| r.success).collect();

        match successful.len() {
            0 => {
                let message = self
                    .localizer
                    .translate(keys::NO_VALID_RESPONSES, &[], &input.language);
                let failures = responses
                    .iter()
                    .map(|r| (r.adapter.clone(), r.error.clone().unwrap_or_default()))
                    .collect();
                warn!("No adapter produced a valid response");
                Err(ConsensusError::NoValidResponses { message, failures })
            }
            1 => {
                debug!(adapter = %successful[0].adapter, "Single response, skipping scoring");
                Ok(ConsensusResult::single(successful[0]))
            }
            _ => Ok(self.reconcile(&successful, &input).await),
        }
    }

    /// Selected ids reordered by language fitness; rejects empty or unknown selections
    fn order_adapters(
        &self,
        selected: &[AdapterId],
        language: &str,
    ) -> Result<Vec<Arc<dyn ModelAdapter>>, ConsensusError> {
        if selected.is_empty() {
            return Err(ConsensusError::NoAdapters);
        }
        let mut unique: Vec<AdapterId> = Vec::with_capacity(selected.len());
        for id in selected {
            if !self.adapters.contains(id) {
                return Err(ConsensusError::UnknownAdapter(id.clone()));
            }
            if !unique.contains(id) {
                unique.push(id.clone());
            }
        }
        let profiles = self.adapters.profiles();
        Ok(order_by_language_fitness(&unique, &profiles, language)
            .iter()
            .filter_map(|id| self.adapters.get(id))
            .collect())
    }

    /// Query every adapter concurrently; results come back in priority order
    async fn query_all(
        &self,
        adapters: &[Arc<dyn ModelAdapter>],
        input: &ResolveInput,
        progress: &dyn ProgressNotifier,
    ) -> Vec<AdapterResponse> {
        let mut join_set = JoinSet::new();

        for (index, adapter) in adapters.iter().enumerate() {
            let adapter = Arc::clone(adapter);
            let prompt = input.prompt.clone();
            let language = input.language.clone();
            let retry = self.params.retry.clone();
            let timeout = self.params.call_timeout;

            join_set.spawn(async move {
                let result =
                    invoke_with_retry(adapter.as_ref(), &prompt, &language, &retry, timeout).await;
                let response = match result {
                    Ok(content) => AdapterResponse::success(adapter.id().clone(), content, language),
                    Err(e) => AdapterResponse::failure(adapter.id().clone(), e.to_string(), language),
                };
                (index, response)
            });
        }

        let mut responses: Vec<(usize, AdapterResponse)> = Vec::with_capacity(adapters.len());
        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, response)) => {
                    if response.success {
                        debug!(adapter = %response.adapter, "Adapter responded");
                    } else {
                        warn!(
                            adapter = %response.adapter,
                            error = response.error.as_deref().unwrap_or(""),
                            "Adapter failed"
                        );
                    }
                    progress.on_adapter_complete(&response.adapter, response.success);
                    responses.push((index, response));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        responses.sort_by_key(|(index, _)| *index);
        responses.into_iter().map(|(_, r)| r).collect()
    }

    /// Score two or more successful responses and select or merge
    async fn reconcile(
        &self,
        successful: &[&AdapterResponse],
        input: &ResolveInput,
    ) -> ConsensusResult {
        let language = input.language.as_str();
        let texts: Vec<(AdapterId, &str)> = successful
            .iter()
            .map(|r| (r.adapter.clone(), r.content.as_str()))
            .collect();
        let matrix = SimilarityMatrix::compute(&texts, language);
        let user_weights = self.user_weights(input).await;

        let ctx = ScoringContext {
            prompt: &input.prompt,
            language,
            weights: &self.params.weights,
        };
        let scored: Vec<(AdapterId, f64)> = successful
            .iter()
            .map(|r| {
                let profile = self.profile_of(&r.adapter);
                let score = score_response(
                    &profile,
                    &r.content,
                    matrix.mean_peer_similarity(&r.adapter),
                    user_weights.weight_for(&r.adapter),
                    &ctx,
                );
                (r.adapter.clone(), score)
            })
            .collect();
        let scores: BTreeMap<AdapterId, f64> = scored.iter().cloned().collect();

        let ranked = rank(&scored);
        let Some(selection) = select(&ranked, self.params.near_tie_threshold) else {
            // `successful` holds at least two responses, so the ranking is never empty
            return ConsensusResult::single(successful[0]);
        };
        let content_of = |id: &AdapterId| {
            successful
                .iter()
                .find(|r| &r.adapter == id)
                .map(|r| r.content.clone())
                .unwrap_or_default()
        };

        match selection {
            Selection::Best { primary, score } => {
                info!(primary = %primary, score, "Selected best-scored response");
                ConsensusResult {
                    content: content_of(&primary),
                    primary,
                    secondary: None,
                    score,
                    scores,
                    method: ConsensusMethod::BestScore,
                    language: language.to_string(),
                    translated_content: None,
                    target_language: None,
                }
            }
            Selection::Merge {
                primary,
                secondary,
                score,
            } => {
                info!(primary = %primary, secondary = %secondary, score, "Merging near-tied responses");
                let first = content_of(&primary);
                let second = content_of(&secondary);
                let content = self.merge(&primary, &first, &second, language).await;
                ConsensusResult {
                    content,
                    primary,
                    secondary: Some(secondary),
                    score,
                    scores,
                    method: ConsensusMethod::MergedConsensus,
                    language: language.to_string(),
                    translated_content: None,
                    target_language: None,
                }
            }
        }
    }

    /// Reconcile two texts with one extra adapter call; the first text on failure
    async fn merge(&self, primary: &AdapterId, first: &str, second: &str, language: &str) -> String {
        let merger = self
            .params
            .merge_adapter
            .as_ref()
            .and_then(|id| self.adapters.get(id))
            .or_else(|| self.adapters.get(primary));
        let Some(merger) = merger else {
            return first.to_string();
        };

        let instruction = self
            .localizer
            .translate(keys::MERGE_RESPONSES_INSTRUCTION, &[], language);
        let instruction = if instruction == keys::MERGE_RESPONSES_INSTRUCTION {
            PromptTemplate::merge_instruction().to_string()
        } else {
            instruction
        };
        let prompt = PromptTemplate::merge(&instruction, first, second);

        match invoke_with_retry(
            merger.as_ref(),
            &prompt,
            language,
            &self.params.retry,
            self.params.call_timeout,
        )
        .await
        {
            Ok(merged) if !merged.trim().is_empty() => merged,
            Ok(_) => {
                warn!(adapter = %merger.id(), "Merge returned empty text, keeping top response");
                first.to_string()
            }
            Err(e) => {
                warn!(adapter = %merger.id(), error = %e, "Merge failed, keeping top response");
                first.to_string()
            }
        }
    }

    async fn user_weights(&self, input: &ResolveInput) -> UserWeights {
        let (Some(feedback), Some(user)) = (&self.feedback, &input.user) else {
            return UserWeights::new();
        };
        let category = PromptCategory::of(&input.prompt);
        match feedback.weights(user, &input.language, category).await {
            Ok(weights) => weights,
            Err(e) => {
                warn!(user = %user, error = %e, "Could not load feedback weights, using defaults");
                UserWeights::new()
            }
        }
    }

    fn profile_of(&self, id: &AdapterId) -> AdapterProfile {
        self.adapters
            .get(id)
            .map(|a| a.profile().clone())
            .unwrap_or_else(|| AdapterProfile::new(id.clone(), id.as_str(), "unknown", "unknown"))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::ports::localization::KeyLocalizer;
    use crate::ports::model_adapter::AdapterError;
    use crate::ports::research_store::StoreError;
    use async_trait::async_trait;
    use consensus_domain::{CoverageTier, ModelRating};
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Scripted adapter: pops queued replies, then repeats the fallback
    pub(crate) struct MockAdapter {
        profile: AdapterProfile,
        replies: Mutex<VecDeque<Result<String, AdapterError>>>,
        fallback: Result<String, AdapterError>,
        pub(crate) calls: AtomicUsize,
        pub(crate) prompts: Mutex<Vec<String>>,
    }

    impl MockAdapter {
        pub(crate) fn always(id: &str, reply: &str) -> Self {
            Self::with_fallback(id, Ok(reply.to_string()))
        }

        pub(crate) fn failing(id: &str) -> Self {
            Self::with_fallback(id, Err(AdapterError::transport(id, "unavailable")))
        }

        fn with_fallback(id: &str, fallback: Result<String, AdapterError>) -> Self {
            Self {
                profile: AdapterProfile::new(id, id, id, "mock-model")
                    .with_strengths(&["multilingual"])
                    .with_coverage(CoverageTier::Major),
                replies: Mutex::new(VecDeque::new()),
                fallback,
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn then(self, reply: Result<String, AdapterError>) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        pub(crate) fn with_profile(mut self, profile: AdapterProfile) -> Self {
            self.profile = profile;
            self
        }

        pub(crate) fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ModelAdapter for MockAdapter {
        fn profile(&self) -> &AdapterProfile {
            &self.profile
        }

        async fn invoke(&self, prompt: &str, _language: &str) -> Result<String, AdapterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| self.fallback.clone())
        }
    }

    pub(crate) fn fast_params() -> ConsensusParams {
        ConsensusParams::default()
            .with_retry(RetryPolicy::default().with_initial_delay(Duration::from_millis(1)))
            .with_call_timeout(Some(Duration::from_secs(5)))
    }

    fn engine(adapters: Vec<Arc<MockAdapter>>) -> ConsensusEngine {
        let mut registry = AdapterRegistry::new();
        for adapter in adapters {
            registry.register(adapter);
        }
        ConsensusEngine::new(Arc::new(registry), Arc::new(KeyLocalizer)).with_params(fast_params())
    }

    fn ids(items: &[&str]) -> Vec<AdapterId> {
        items.iter().map(|s| AdapterId::from(*s)).collect()
    }

    #[tokio::test]
    async fn test_single_success_is_verbatim() {
        let a = Arc::new(MockAdapter::always("a", "The only answer."));
        let b = Arc::new(MockAdapter::failing("b"));
        let engine = engine(vec![a, b.clone()]);

        let result = engine
            .resolve(ResolveInput::new("question", ids(&["a", "b"]), "en"))
            .await
            .unwrap();
        assert_eq!(result.content, "The only answer.");
        assert_eq!(result.method, ConsensusMethod::Single);
        assert!(result.scores.is_empty());
        // the failing adapter was retried up to the limit
        assert_eq!(b.call_count(), 3);
    }

    #[tokio::test]
    async fn test_zero_successes_fail() {
        let engine = engine(vec![
            Arc::new(MockAdapter::failing("a")),
            Arc::new(MockAdapter::failing("b")),
        ]);
        let err = engine
            .resolve(ResolveInput::new("question", ids(&["a", "b"]), "en"))
            .await
            .unwrap_err();
        match err {
            ConsensusError::NoValidResponses { message, failures } => {
                assert_eq!(message, "no_valid_responses");
                assert_eq!(failures.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_transient_failure_recovers() {
        let a = Arc::new(
            MockAdapter::always("a", "Recovered answer.")
                .then(Err(AdapterError::transport("a", "reset"))),
        );
        let engine = engine(vec![a.clone()]);
        let result = engine
            .resolve(ResolveInput::new("question", ids(&["a"]), "en"))
            .await
            .unwrap();
        assert_eq!(result.content, "Recovered answer.");
        assert_eq!(a.call_count(), 2);
    }

    #[tokio::test]
    async fn test_near_tie_is_merged() {
        // both replies share the same prompt terms, so only the tail word differs
        let a = Arc::new(MockAdapter::always("a", "Solar and wind energy are growing"));
        let b = Arc::new(MockAdapter::always("b", "Solar and wind energy are expanding"));
        let engine =
            engine(vec![a.clone(), b]).with_params(fast_params().with_merge_adapter("a"));

        let result = engine
            .resolve(ResolveInput::new("renewable energy", ids(&["a", "b"]), "en"))
            .await
            .unwrap();
        assert_eq!(result.method, ConsensusMethod::MergedConsensus);
        assert_eq!(result.scores.len(), 2);
        assert!(result.secondary.is_some());
        let merge_prompt = a.prompts.lock().unwrap().last().cloned().unwrap_or_default();
        assert!(merge_prompt.contains("Response 1:"));
    }

    #[tokio::test]
    async fn test_clear_winner_is_verbatim() {
        let long_answer = "Renewable energy sources such as solar and wind provide clean power. "
            .repeat(30);
        let a = Arc::new(MockAdapter::always("a", &long_answer));
        let b = Arc::new(MockAdapter::always("b", "No."));
        let engine = engine(vec![a, b.clone()]);

        let result = engine
            .resolve(ResolveInput::new("Explain renewable energy sources", ids(&["a", "b"]), "en"))
            .await
            .unwrap();
        assert_eq!(result.method, ConsensusMethod::BestScore);
        assert_eq!(result.primary.as_str(), "a");
        assert_eq!(result.content, long_answer);
        assert!(result.secondary.is_none());
        // no merge call was issued
        assert_eq!(b.call_count(), 1);
    }

    #[tokio::test]
    async fn test_merge_failure_keeps_top_text() {
        let text = "Solar and wind power are growing";
        let a = Arc::new(MockAdapter::failing("a").then(Ok(text.to_string())));
        let b = Arc::new(MockAdapter::always("b", text));
        let engine = ConsensusEngine::new(
            Arc::new(AdapterRegistry::new().with_adapter(a.clone()).with_adapter(b)),
            Arc::new(KeyLocalizer),
        )
        .with_params(fast_params().with_merge_adapter("a"));

        let result = engine
            .resolve(ResolveInput::new("renewable energy", ids(&["a", "b"]), "en"))
            .await
            .unwrap();
        assert_eq!(result.method, ConsensusMethod::MergedConsensus);
        assert_eq!(result.content, text);
    }

    #[tokio::test]
    async fn test_unknown_and_empty_selection() {
        let engine = engine(vec![Arc::new(MockAdapter::always("a", "x"))]);
        assert!(matches!(
            engine.resolve(ResolveInput::new("q", vec![], "en")).await,
            Err(ConsensusError::NoAdapters)
        ));
        assert!(matches!(
            engine.resolve(ResolveInput::new("q", ids(&["zzz"]), "en")).await,
            Err(ConsensusError::UnknownAdapter(_))
        ));
    }

    struct FixedFeedback(UserWeights);

    #[async_trait]
    impl FeedbackStore for FixedFeedback {
        async fn record_feedback(
            &self,
            _user: &str,
            _language: &str,
            _category: PromptCategory,
            _ratings: &HashMap<AdapterId, ModelRating>,
        ) -> Result<(), StoreError> {
            Ok(())
        }

        async fn weights(
            &self,
            _user: &str,
            _language: &str,
            _category: PromptCategory,
        ) -> Result<UserWeights, StoreError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_user_weights_break_the_tie() {
        let a = Arc::new(MockAdapter::always("a", "Solar and wind energy are growing"));
        let b = Arc::new(MockAdapter::always("b", "Solar and wind energy are expanding"));
        let input = || {
            ResolveInput::new("renewable energy", ids(&["a", "b"]), "en")
                .with_user(Some("alice".to_string()))
        };

        // without ratings the tie goes to the first adapter
        let unweighted = engine(vec![a.clone(), b.clone()])
            .resolve(input())
            .await
            .unwrap();
        assert_eq!(unweighted.method, ConsensusMethod::MergedConsensus);
        assert_eq!(unweighted.primary.as_str(), "a");

        let feedback = FixedFeedback(UserWeights::new().with_weight("b", 2.0));
        let weighted = engine(vec![a, b])
            .with_feedback(Arc::new(feedback))
            .resolve(input())
            .await
            .unwrap();
        assert_eq!(weighted.method, ConsensusMethod::BestScore);
        assert_eq!(weighted.primary.as_str(), "b");
        assert_eq!(weighted.content, "Solar and wind energy are expanding");
        let score_of = |id: &str| {
            weighted
                .scores
                .iter()
                .find(|(k, _)| k.as_str() == id)
                .map(|(_, v)| *v)
                .unwrap()
        };
        assert!(score_of("b") > score_of("a") + 0.1);
    }
}
