//! Run Research use case
//!
//! Drives one research record through its lifecycle:
//!
//! ```text
//! pending ─▶ processing (10) ─▶ plan (20) ─▶ steps (20..80) ─▶ article + notes (90) ─▶ completed (100)
//!                 │                                 │
//!                 └──────────── failed ◀────────────┘
//! ```
//!
//! Step failures are recorded and the run continues. Only store errors and
//! cancellation move the record to `failed`; everything produced until then
//! stays on the record.

use crate::config::ResearchParams;
use crate::ports::localization::{Localizer, keys};
use crate::ports::model_adapter::AdapterRegistry;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::research_logger::{NoResearchLogger, ResearchEvent, ResearchLogger};
use crate::ports::research_store::{ResearchStore, StoreError};
use crate::use_cases::plan_research::{PlanInput, PlanResearchUseCase};
use crate::use_cases::resolve_consensus::{ConsensusEngine, ResolveInput};
use crate::use_cases::retry::invoke_with_retry;
use crate::use_cases::shared::check_cancelled;
use consensus_domain::{
    Article, ConsensusResult, DomainError, PromptTemplate, ResearchId, ResearchNotes,
    ResearchRecord, ResearchRequest, ResearchStatus, ResearchUpdate, Step, StepOutcome,
    best_adapters_for_language, quality_score,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Progress reached after the record moves to `processing`
const PROGRESS_STARTED: u8 = 10;
/// Progress reached once the plan is stored
const PROGRESS_PLANNED: u8 = 20;
/// Progress span covered by the steps
const PROGRESS_STEPS_SPAN: usize = 60;
const PROGRESS_ARTICLE: u8 = 90;
const PROGRESS_DONE: u8 = 100;

/// Errors that end a research run
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Invalid research request: {0}")]
    InvalidRequest(#[from] DomainError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Research was cancelled")]
    Cancelled,
}

/// Research pipeline
pub struct RunResearchUseCase {
    store: Arc<dyn ResearchStore>,
    engine: Arc<ConsensusEngine>,
    planner: PlanResearchUseCase,
    localizer: Arc<dyn Localizer>,
    logger: Arc<dyn ResearchLogger>,
    params: ResearchParams,
    cancellation_token: Option<CancellationToken>,
}

impl RunResearchUseCase {
    pub fn new(
        store: Arc<dyn ResearchStore>,
        engine: Arc<ConsensusEngine>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        let params = ResearchParams::default();
        let planner = Self::build_planner(&engine, &params);
        Self {
            store,
            engine,
            planner,
            localizer,
            logger: Arc::new(NoResearchLogger),
            params,
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: ResearchParams) -> Self {
        self.planner = Self::build_planner(&self.engine, &params);
        self.params = params;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ResearchLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    fn build_planner(engine: &ConsensusEngine, params: &ResearchParams) -> PlanResearchUseCase {
        let consensus = engine.params();
        PlanResearchUseCase::new(Arc::new(engine.adapters().clone()))
            .with_planning_adapter(params.planning_adapter.clone())
            .with_retry(consensus.retry.clone())
            .with_call_timeout(consensus.call_timeout)
    }

    fn registry(&self) -> &AdapterRegistry {
        self.engine.adapters()
    }

    /// Validate a request and create its `pending` record
    pub async fn submit(&self, request: ResearchRequest) -> Result<ResearchId, PipelineError> {
        request.validate(&self.registry().ids())?;
        let id = self.store.create(request).await?;
        info!(research = %id, "Research submitted");
        Ok(id)
    }

    /// Submit and process a request in one go
    pub async fn run(
        &self,
        request: ResearchRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchRecord, PipelineError> {
        let id = self.submit(request).await?;
        self.execute_with_progress(&id, progress).await
    }

    /// Process a submitted record with default (no-op) progress
    pub async fn execute(&self, id: &ResearchId) -> Result<ResearchRecord, PipelineError> {
        self.execute_with_progress(id, &NoProgress).await
    }

    /// Process a submitted record.
    ///
    /// Returns the final record, `completed` or `failed`. An `Err` means the
    /// store could not be read or the failure itself could not be recorded.
    pub async fn execute_with_progress(
        &self,
        id: &ResearchId,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchRecord, PipelineError> {
        let record = self.store.get(id).await?;

        match self.process(id, &record.request, progress).await {
            Ok(record) => Ok(record),
            Err(e) => {
                let message = match &e {
                    PipelineError::Cancelled => self.localizer.translate(
                        keys::RESEARCH_CANCELLED,
                        &[],
                        &record.request.language,
                    ),
                    other => other.to_string(),
                };
                warn!(research = %id, error = %message, "Research failed");
                self.logger.log(ResearchEvent::new(
                    "research_failed",
                    json!({ "research": id.as_str(), "error": message }),
                ));
                let failed = self
                    .store
                    .update(
                        id,
                        ResearchUpdate::new()
                            .status(ResearchStatus::Failed)
                            .error(message),
                    )
                    .await?;
                progress.on_progress(failed.status, failed.progress);
                Ok(failed)
            }
        }
    }

    async fn process(
        &self,
        id: &ResearchId,
        request: &ResearchRequest,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchRecord, PipelineError> {
        self.set_progress(
            id,
            ResearchUpdate::new().status(ResearchStatus::Processing),
            PROGRESS_STARTED,
            progress,
        )
        .await?;

        // ==================== Phase 1: Plan ====================

        check_cancelled(&self.cancellation_token)?;
        let plan = self
            .planner
            .execute(&PlanInput {
                topic: request.topic.clone(),
                description: request.description.clone(),
                depth: request.depth,
                language: request.language.clone(),
                candidates: request.adapters.clone(),
            })
            .await;
        progress.on_plan_ready(&plan);
        self.set_progress(
            id,
            ResearchUpdate::new().plan(plan.clone()),
            PROGRESS_PLANNED,
            progress,
        )
        .await?;

        // ==================== Phase 2: Steps ====================

        let total = plan.len();
        let mut outcomes = Vec::with_capacity(total);
        for (index, step) in plan.into_iter().enumerate() {
            check_cancelled(&self.cancellation_token)?;
            let outcome = self.run_step(id, step, total, request, progress).await;
            outcomes.push(outcome.clone());

            let percent = PROGRESS_PLANNED as usize + (index + 1) * PROGRESS_STEPS_SPAN / total;
            self.set_progress(
                id,
                ResearchUpdate::new().step(outcome),
                percent as u8,
                progress,
            )
            .await?;
        }

        // ==================== Phase 3: Article and notes ====================

        check_cancelled(&self.cancellation_token)?;
        progress.on_article_start();
        let article = self.generate_article(request, &outcomes, progress).await;
        let notes = ResearchNotes::from_outcomes(&outcomes, request.language.clone());
        let quality = quality_score(&outcomes, &article);
        self.set_progress(
            id,
            ResearchUpdate::new().article(article).notes(notes),
            PROGRESS_ARTICLE,
            progress,
        )
        .await?;

        // ==================== Phase 4: Complete ====================

        let record = self
            .set_progress(
                id,
                ResearchUpdate::new()
                    .quality_score(quality)
                    .status(ResearchStatus::Completed),
                PROGRESS_DONE,
                progress,
            )
            .await?;

        info!(
            research = %id,
            steps = record.steps.len(),
            successful = record.successful_steps(),
            quality = quality,
            "Research completed"
        );
        self.logger.log(ResearchEvent::new(
            "research_completed",
            json!({
                "research": id.as_str(),
                "steps": record.steps.len(),
                "successful_steps": record.successful_steps(),
                "quality_score": quality,
            }),
        ));
        Ok(record)
    }

    async fn set_progress(
        &self,
        id: &ResearchId,
        update: ResearchUpdate,
        percent: u8,
        progress: &dyn ProgressNotifier,
    ) -> Result<ResearchRecord, PipelineError> {
        let record = self.store.update(id, update.progress(percent)).await?;
        progress.on_progress(record.status, record.progress);
        Ok(record)
    }

    /// Run one step through the consensus engine; failures become failed outcomes
    async fn run_step(
        &self,
        id: &ResearchId,
        step: Step,
        total: usize,
        request: &ResearchRequest,
        progress: &dyn ProgressNotifier,
    ) -> StepOutcome {
        info!(research = %id, step = step.number, total, title = %step.title, "Running step");
        progress.on_step_start(&step, total);
        self.logger.log(ResearchEvent::new(
            "step_started",
            json!({
                "research": id.as_str(),
                "step": step.number,
                "title": step.title,
                "language": request.language,
            }),
        ));

        let input = ResolveInput::new(
            step.description.clone(),
            request.adapters.clone(),
            request.language.clone(),
        )
        .with_user(request.user.clone());

        let outcome = match self.engine.resolve_with_progress(input, progress).await {
            Ok(consensus) => {
                let consensus = self.translate_step(consensus, request).await;
                self.logger.log(ResearchEvent::new(
                    "step_completed",
                    json!({
                        "research": id.as_str(),
                        "step": step.number,
                        "method": consensus.method.as_str(),
                        "primary": consensus.primary.as_str(),
                        "score": consensus.score,
                    }),
                ));
                StepOutcome::completed(step, consensus, request.language.clone())
            }
            Err(e) => {
                warn!(research = %id, step = step.number, error = %e, "Step failed");
                self.logger.log(ResearchEvent::new(
                    "step_failed",
                    json!({
                        "research": id.as_str(),
                        "step": step.number,
                        "error": e.to_string(),
                    }),
                ));
                StepOutcome::failed(step, e.to_string(), request.language.clone())
            }
        };

        progress.on_step_complete(&outcome, total);
        outcome
    }

    /// Best-effort translation into the request's target language.
    ///
    /// Uses the selected adapter that fits the target language best. The
    /// result is left untranslated when the call fails.
    async fn translate_step(
        &self,
        consensus: ConsensusResult,
        request: &ResearchRequest,
    ) -> ConsensusResult {
        if !self.params.translate_steps {
            return consensus;
        }
        let Some(target) = request.translation_target() else {
            return consensus;
        };

        let profiles: Vec<_> = self
            .registry()
            .profiles()
            .into_iter()
            .filter(|p| request.adapters.contains(&p.id))
            .collect();
        let Some(adapter) = best_adapters_for_language(&profiles, target)
            .first()
            .and_then(|(profile, _)| self.registry().get(&profile.id))
        else {
            return consensus;
        };

        let prompt = PromptTemplate::translation(&consensus.content, &request.language, target);
        let engine_params = self.engine.params();
        match invoke_with_retry(
            adapter.as_ref(),
            &prompt,
            target,
            &engine_params.retry,
            engine_params.call_timeout,
        )
        .await
        {
            Ok(translated) => {
                debug!(adapter = %adapter.id(), target_language = target, "Translated step result");
                consensus.with_translation(translated, target)
            }
            Err(e) => {
                warn!(
                    adapter = %adapter.id(),
                    target_language = target,
                    error = %e,
                    "Translation failed, keeping source text"
                );
                consensus
            }
        }
    }

    /// One consensus round over the step findings.
    ///
    /// Failure yields a localized notice as the article content.
    async fn generate_article(
        &self,
        request: &ResearchRequest,
        outcomes: &[StepOutcome],
        progress: &dyn ProgressNotifier,
    ) -> Article {
        let language = request.output_language();
        let findings = outcomes
            .iter()
            .filter_map(|o| {
                o.consensus()
                    .map(|c| format!("## {}\n\n{}", o.step.title, c.display_content()))
            })
            .collect::<Vec<_>>()
            .join("\n\n");

        let prompt = PromptTemplate::article(&request.topic, &findings, language);
        let input = ResolveInput::new(prompt, request.adapters.clone(), language)
            .with_user(request.user.clone());

        match self.engine.resolve_with_progress(input, progress).await {
            Ok(consensus) => {
                info!(method = %consensus.method, "Article generated");
                Article::new(
                    request.topic.clone(),
                    consensus.content,
                    language,
                    request.language.clone(),
                )
            }
            Err(e) => {
                warn!(error = %e, "Article generation failed");
                let error = e.to_string();
                let notice = self.localizer.translate(
                    keys::ARTICLE_GENERATION_FAILED,
                    &[("error", error.as_str())],
                    language,
                );
                Article::failed(
                    request.topic.clone(),
                    notice,
                    language,
                    request.language.clone(),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::localization::KeyLocalizer;
    use crate::ports::model_adapter::AdapterError;
    use crate::use_cases::resolve_consensus::tests::{MockAdapter, fast_params};
    use async_trait::async_trait;
    use consensus_domain::{ConsensusMethod, StepResult};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<HashMap<ResearchId, ResearchRecord>>,
    }

    #[async_trait]
    impl ResearchStore for MemoryStore {
        async fn create(&self, request: ResearchRequest) -> Result<ResearchId, StoreError> {
            let mut records = self.records.lock().unwrap();
            let id = ResearchId::new(format!("r{}", records.len() + 1));
            records.insert(id.clone(), ResearchRecord::new(id.clone(), request));
            Ok(id)
        }

        async fn get(&self, id: &ResearchId) -> Result<ResearchRecord, StoreError> {
            self.records
                .lock()
                .unwrap()
                .get(id)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(id.clone()))
        }

        async fn update(
            &self,
            id: &ResearchId,
            update: ResearchUpdate,
        ) -> Result<ResearchRecord, StoreError> {
            let mut records = self.records.lock().unwrap();
            let record = records
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.clone()))?;
            record.apply(update)?;
            Ok(record.clone())
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        percents: Mutex<Vec<u8>>,
        finished_steps: Mutex<Vec<usize>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_progress(&self, _status: ResearchStatus, progress: u8) {
            self.percents.lock().unwrap().push(progress);
        }

        fn on_step_start(&self, _step: &Step, _total_steps: usize) {}

        fn on_step_complete(&self, outcome: &StepOutcome, _total_steps: usize) {
            self.finished_steps.lock().unwrap().push(outcome.step.number);
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ResearchLogger for RecordingLogger {
        fn log(&self, event: ResearchEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn pipeline(adapters: Vec<Arc<MockAdapter>>) -> (RunResearchUseCase, Arc<MemoryStore>) {
        let mut registry = AdapterRegistry::new();
        for adapter in adapters {
            registry.register(adapter);
        }
        let localizer: Arc<dyn Localizer> = Arc::new(KeyLocalizer);
        let engine = ConsensusEngine::new(Arc::new(registry), localizer.clone())
            .with_params(fast_params());
        let store = Arc::new(MemoryStore::default());
        let use_case = RunResearchUseCase::new(store.clone(), Arc::new(engine), localizer);
        (use_case, store)
    }

    fn request(depth: usize) -> ResearchRequest {
        ResearchRequest::new("Renewable energy")
            .with_description("Current state and outlook")
            .with_depth(depth)
            .with_adapters(["a", "b"])
    }

    #[tokio::test]
    async fn test_near_identical_adapters_merge_every_step() {
        let a = Arc::new(MockAdapter::always("a", "Solar and wind energy are growing"));
        let b = Arc::new(MockAdapter::always("b", "Solar and wind energy are expanding"));
        let (use_case, _) = pipeline(vec![a, b]);
        let progress = RecordingProgress::default();

        let record = use_case.run(request(3), &progress).await.unwrap();

        assert_eq!(record.status, ResearchStatus::Completed);
        assert_eq!(record.progress, 100);
        assert_eq!(record.plan.len(), 3);
        assert_eq!(record.steps.len(), 3);
        for outcome in &record.steps {
            let consensus = outcome.consensus().unwrap();
            assert_eq!(consensus.method, ConsensusMethod::MergedConsensus);
            assert!(consensus.secondary.is_some());
        }
        assert!(record.article.as_ref().unwrap().generated);
        assert!(record.quality_score.unwrap() > 0.0);
        assert!(record.completed_at.is_some());
        assert_eq!(*progress.finished_steps.lock().unwrap(), vec![1, 2, 3]);

        let percents = progress.percents.lock().unwrap().clone();
        assert_eq!(percents, vec![10, 20, 40, 60, 80, 90, 100]);
    }

    #[tokio::test]
    async fn test_failed_step_is_recorded_and_run_continues() {
        // planning call, step 1 and 3 answers of "a" succeed; step 2 fails on every attempt
        let a = Arc::new(
            MockAdapter::always("a", "Solar and wind power are growing")
                .then(Ok("not a plan".to_string()))
                .then(Ok("Solar and wind power are growing".to_string()))
                .then(Err(AdapterError::transport("a", "down")))
                .then(Err(AdapterError::transport("a", "down")))
                .then(Err(AdapterError::transport("a", "down"))),
        );
        let (use_case, _) = pipeline(vec![a]);
        let record = use_case
            .run(request(3).with_adapters(["a"]), &NoProgress)
            .await
            .unwrap();

        assert_eq!(record.status, ResearchStatus::Completed);
        assert_eq!(record.steps.len(), 3);
        assert!(record.steps[0].is_success());
        assert!(matches!(record.steps[1].result, StepResult::Failed { .. }));
        assert!(record.steps[2].is_success());
        assert_eq!(record.successful_steps(), 2);
        assert_eq!(record.notes.as_ref().unwrap().successful_steps, 2);

        // completion 2/3 of 30, short article 10, single-adapter steps add no
        // consensus points, fewer than three sections 5
        let quality = record.quality_score.unwrap();
        assert!((quality - 35.0).abs() < 1e-9, "quality was {quality}");
    }

    #[tokio::test]
    async fn test_all_adapters_down_yields_failure_notices() {
        let (use_case, _) = pipeline(vec![
            Arc::new(MockAdapter::failing("a")),
            Arc::new(MockAdapter::failing("b")),
        ]);
        let record = use_case.run(request(2), &NoProgress).await.unwrap();

        // planning fell back to the template and every step errored
        assert_eq!(record.status, ResearchStatus::Completed);
        assert_eq!(record.plan.len(), 2);
        assert!(record.steps.iter().all(|o| !o.is_success()));
        let article = record.article.unwrap();
        assert!(!article.generated);
        assert_eq!(article.content, "article_generation_failed");
    }

    #[tokio::test]
    async fn test_invalid_request_is_rejected_before_creation() {
        let (use_case, store) = pipeline(vec![Arc::new(MockAdapter::always("a", "x"))]);
        let err = use_case
            .submit(request(0).with_adapters(["a"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidRequest(DomainError::InvalidDepth)
        ));
        let err = use_case
            .submit(request(2).with_adapters(["missing"]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidRequest(DomainError::UnknownAdapter(_))
        ));
        assert!(store.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_marks_record_failed() {
        let (use_case, _) = pipeline(vec![Arc::new(MockAdapter::always("a", "answer"))]);
        let token = CancellationToken::new();
        token.cancel();
        let use_case = use_case.with_cancellation(token);

        let record = use_case
            .run(request(2).with_adapters(["a"]), &NoProgress)
            .await
            .unwrap();
        assert_eq!(record.status, ResearchStatus::Failed);
        assert_eq!(record.error.as_deref(), Some("research_cancelled"));
        assert_eq!(record.progress, 10);
        assert!(record.steps.is_empty());
    }

    #[tokio::test]
    async fn test_translation_is_attached_to_steps() {
        let a = Arc::new(MockAdapter::always("a", "Solar power is growing"));
        let (use_case, _) = pipeline(vec![a]);
        let logger = Arc::new(RecordingLogger::default());
        let use_case = use_case.with_logger(logger.clone());

        let record = use_case
            .run(
                request(1).with_adapters(["a"]).with_target_language("tr"),
                &NoProgress,
            )
            .await
            .unwrap();

        let consensus = record.steps[0].consensus().unwrap();
        assert_eq!(consensus.target_language.as_deref(), Some("tr"));
        assert!(consensus.translated_content.is_some());
        assert_eq!(record.article.as_ref().unwrap().language, "tr");

        let events = logger.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["step_started", "step_completed", "research_completed"]
        );
    }

    #[tokio::test]
    async fn test_translation_can_be_disabled() {
        let (use_case, _) = pipeline(vec![Arc::new(MockAdapter::always("a", "text"))]);
        let use_case = use_case.with_params(ResearchParams::default().without_translation());
        let record = use_case
            .run(
                request(1).with_adapters(["a"]).with_target_language("de"),
                &NoProgress,
            )
            .await
            .unwrap();
        assert!(record.steps[0].consensus().unwrap().translated_content.is_none());
    }
}
