//! Plan Research use case
//!
//! Asks one adapter for a step-by-step research plan and falls back to the
//! canonical template of the language when the reply is unusable.

use crate::config::RetryPolicy;
use crate::ports::model_adapter::{AdapterRegistry, ModelAdapter};
use crate::use_cases::retry::invoke_with_retry;
use consensus_domain::{
    AdapterId, PromptTemplate, Step, best_adapters_for_language, fallback_steps,
    normalize_to_depth, parse_plan_steps,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Input for planning one research run
#[derive(Debug, Clone)]
pub struct PlanInput {
    pub topic: String,
    pub description: String,
    pub depth: usize,
    pub language: String,
    /// Adapters the run may use; the planning adapter is picked among them
    /// unless a designated one is configured
    pub candidates: Vec<AdapterId>,
}

/// Research planner
///
/// Never fails: every planning problem degrades to the fallback template.
pub struct PlanResearchUseCase {
    adapters: Arc<AdapterRegistry>,
    planning_adapter: Option<AdapterId>,
    retry: RetryPolicy,
    call_timeout: Option<Duration>,
}

impl PlanResearchUseCase {
    pub fn new(adapters: Arc<AdapterRegistry>) -> Self {
        Self {
            adapters,
            planning_adapter: None,
            retry: RetryPolicy::default(),
            call_timeout: Some(Duration::from_secs(30)),
        }
    }

    pub fn with_planning_adapter(mut self, adapter: Option<AdapterId>) -> Self {
        self.planning_adapter = adapter;
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

    /// Exactly `input.depth` steps
    pub async fn execute(&self, input: &PlanInput) -> Vec<Step> {
        let steps = match self.request_plan(input).await {
            Some(steps) => {
                info!(steps = steps.len(), "Using adapter-generated plan");
                steps
            }
            None => {
                info!(language = %input.language, "Using fallback plan template");
                fallback_steps(&input.topic, &input.language)
            }
        };
        normalize_to_depth(steps, input.depth, &input.topic, &input.language)
    }

    async fn request_plan(&self, input: &PlanInput) -> Option<Vec<Step>> {
        let Some(adapter) = self.choose_adapter(input) else {
            warn!("No adapter available for planning");
            return None;
        };

        let prompt = PromptTemplate::plan(
            &input.topic,
            &input.description,
            input.depth,
            &input.language,
        );
        debug!(adapter = %adapter.id(), "Requesting research plan");

        let reply = match invoke_with_retry(
            adapter.as_ref(),
            &prompt,
            &input.language,
            &self.retry,
            self.call_timeout,
        )
        .await
        {
            Ok(reply) => reply,
            Err(e) => {
                warn!(adapter = %adapter.id(), error = %e, "Planning call failed");
                return None;
            }
        };

        let parsed = parse_plan_steps(&reply);
        if parsed.is_none() {
            warn!(adapter = %adapter.id(), "Planning reply contained no usable steps");
        }
        parsed
    }

    /// The designated planning adapter if registered, else the candidate that
    /// best fits the language
    fn choose_adapter(&self, input: &PlanInput) -> Option<Arc<dyn ModelAdapter>> {
        if let Some(id) = &self.planning_adapter {
            match self.adapters.get(id) {
                Some(adapter) => return Some(adapter),
                None => warn!(adapter = %id, "Planning adapter is not configured"),
            }
        }

        let profiles: Vec<_> = self
            .adapters
            .profiles()
            .into_iter()
            .filter(|p| input.candidates.contains(&p.id))
            .collect();
        best_adapters_for_language(&profiles, &input.language)
            .first()
            .and_then(|(profile, _)| self.adapters.get(&profile.id))
    }
}
