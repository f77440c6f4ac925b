//! Research domain entities
//!
//! A [`ResearchRecord`] is created `pending` from a [`ResearchRequest`] and is
//! mutated only through [`ResearchUpdate`]s issued by the pipeline running it.

use crate::consensus::category::TopicCategory;
use crate::consensus::value_objects::{ConsensusResult, current_timestamp};
use crate::core::adapter::AdapterId;
use crate::core::error::DomainError;
use crate::core::language::DEFAULT_LANGUAGE;
use crate::research::article::Article;
use crate::research::notes::ResearchNotes;
use serde::{Deserialize, Serialize};

/// Default number of research steps
pub const DEFAULT_DEPTH: usize = 5;

/// Opaque identifier of a research record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResearchId(String);

impl ResearchId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ResearchId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A request to research a topic (Entity input)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub topic: String,
    #[serde(default)]
    pub description: String,
    /// Language the research is conducted in
    pub language: String,
    /// Language the step results and article are delivered in, when different
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    /// Number of research steps (at least 1)
    pub depth: usize,
    /// Adapters queried for every step
    pub adapters: Vec<AdapterId>,
    /// Requesting user, used to look up feedback weights
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl ResearchRequest {
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            description: String::new(),
            language: DEFAULT_LANGUAGE.to_string(),
            target_language: None,
            depth: DEFAULT_DEPTH,
            adapters: Vec::new(),
            user: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_target_language(mut self, language: impl Into<String>) -> Self {
        self.target_language = Some(language.into());
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_adapters<I, A>(mut self, adapters: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<AdapterId>,
    {
        self.adapters = adapters.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Target language, if it differs from the research language
    pub fn translation_target(&self) -> Option<&str> {
        self.target_language
            .as_deref()
            .filter(|target| !target.is_empty() && *target != self.language)
    }

    /// Language the article is written in: the target language when set
    pub fn output_language(&self) -> &str {
        self.translation_target().unwrap_or(&self.language)
    }

    /// Validate against the set of configured adapters
    pub fn validate(&self, configured: &[AdapterId]) -> Result<(), DomainError> {
        if self.topic.trim().is_empty() {
            return Err(DomainError::InvalidRequest("topic is empty".to_string()));
        }
        if self.depth == 0 {
            return Err(DomainError::InvalidDepth);
        }
        if self.adapters.is_empty() {
            return Err(DomainError::NoAdapters);
        }
        if let Some(unknown) = self.adapters.iter().find(|a| !configured.contains(a)) {
            return Err(DomainError::UnknownAdapter(unknown.to_string()));
        }
        Ok(())
    }
}

/// One step of a research plan (immutable once planned)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based position in the plan
    pub number: usize,
    pub title: String,
    /// The sub-question sent to the adapters
    pub description: String,
}

impl Step {
    pub fn new(number: usize, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Result of running one step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepResult {
    Completed { consensus: ConsensusResult },
    Failed { error: String },
}

/// A step together with its result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: Step,
    #[serde(flatten)]
    pub result: StepResult,
    pub language: String,
    pub timestamp: u64,
}

impl StepOutcome {
    pub fn completed(step: Step, consensus: ConsensusResult, language: impl Into<String>) -> Self {
        Self {
            step,
            result: StepResult::Completed { consensus },
            language: language.into(),
            timestamp: current_timestamp(),
        }
    }

    pub fn failed(step: Step, error: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            step,
            result: StepResult::Failed {
                error: error.into(),
            },
            language: language.into(),
            timestamp: current_timestamp(),
        }
    }

    pub fn consensus(&self) -> Option<&ConsensusResult> {
        match &self.result {
            StepResult::Completed { consensus } => Some(consensus),
            StepResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.result {
            StepResult::Failed { error } => Some(error),
            StepResult::Completed { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.result, StepResult::Completed { .. })
    }
}

/// Lifecycle status of a research record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResearchStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ResearchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResearchStatus::Pending => "pending",
            ResearchStatus::Processing => "processing",
            ResearchStatus::Completed => "completed",
            ResearchStatus::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ResearchStatus::Completed | ResearchStatus::Failed)
    }

    /// Whether the lifecycle allows moving from `self` to `next`
    pub fn can_transition_to(&self, next: ResearchStatus) -> bool {
        use ResearchStatus::*;
        matches!(
            (self, next),
            (Pending, Processing)
                | (Pending, Failed)
                | (Processing, Processing)
                | (Processing, Completed)
                | (Processing, Failed)
        )
    }
}

impl std::fmt::Display for ResearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Partial update of a research record
#[derive(Debug, Clone, Default)]
pub struct ResearchUpdate {
    pub status: Option<ResearchStatus>,
    pub progress: Option<u8>,
    pub plan: Option<Vec<Step>>,
    /// Appended to the record's step outcomes
    pub step: Option<StepOutcome>,
    pub article: Option<Article>,
    pub notes: Option<ResearchNotes>,
    pub quality_score: Option<f64>,
    pub error: Option<String>,
}

impl ResearchUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ResearchStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn plan(mut self, plan: Vec<Step>) -> Self {
        self.plan = Some(plan);
        self
    }

    pub fn step(mut self, outcome: StepOutcome) -> Self {
        self.step = Some(outcome);
        self
    }

    pub fn article(mut self, article: Article) -> Self {
        self.article = Some(article);
        self
    }

    pub fn notes(mut self, notes: ResearchNotes) -> Self {
        self.notes = Some(notes);
        self
    }

    pub fn quality_score(mut self, score: f64) -> Self {
        self.quality_score = Some(score);
        self
    }

    pub fn error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}

/// A research run and everything it has produced so far (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRecord {
    pub id: ResearchId,
    pub request: ResearchRequest,
    pub category: TopicCategory,
    pub status: ResearchStatus,
    /// 0..=100
    pub progress: u8,
    pub plan: Vec<Step>,
    pub steps: Vec<StepOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Article>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<ResearchNotes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    pub word_count: usize,
    pub char_count: usize,
    /// Estimated reading time of the article in minutes
    pub reading_time: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: u64,
    pub updated_at: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
}

impl ResearchRecord {
    /// New `pending` record for a request
    pub fn new(id: ResearchId, request: ResearchRequest) -> Self {
        let now = current_timestamp();
        Self {
            id,
            category: TopicCategory::of(&request.topic),
            request,
            status: ResearchStatus::Pending,
            progress: 0,
            plan: Vec::new(),
            steps: Vec::new(),
            article: None,
            notes: None,
            quality_score: None,
            word_count: 0,
            char_count: 0,
            reading_time: 0,
            error: None,
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Apply a partial update.
    ///
    /// Status changes the lifecycle does not allow are rejected and leave
    /// the record untouched. Progress is clamped to 100. Setting an article
    /// refreshes the word, character and reading-time counts.
    pub fn apply(&mut self, update: ResearchUpdate) -> Result<(), DomainError> {
        if let Some(next) = update.status
            && next != self.status
            && !self.status.can_transition_to(next)
        {
            return Err(DomainError::InvalidRequest(format!(
                "cannot move research {} from {} to {}",
                self.id, self.status, next
            )));
        }

        if let Some(status) = update.status {
            self.status = status;
            if status.is_terminal() {
                self.completed_at = Some(current_timestamp());
            }
        }
        if let Some(progress) = update.progress {
            self.progress = progress.min(100);
        }
        if let Some(plan) = update.plan {
            self.plan = plan;
        }
        if let Some(outcome) = update.step {
            self.steps.push(outcome);
        }
        if let Some(article) = update.article {
            self.word_count = article.word_count();
            self.char_count = article.char_count();
            self.reading_time = article.reading_time();
            self.article = Some(article);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
        if let Some(score) = update.quality_score {
            self.quality_score = Some(score);
        }
        if let Some(error) = update.error {
            self.error = Some(error);
        }
        self.updated_at = current_timestamp();
        Ok(())
    }

    pub fn successful_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_success()).count()
    }

    pub fn failed_steps(&self) -> usize {
        self.steps.len() - self.successful_steps()
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::value_objects::AdapterResponse;

    fn configured() -> Vec<AdapterId> {
        vec![AdapterId::from("gpt4"), AdapterId::from("claude")]
    }

    #[test]
    fn test_request_validation() {
        let ok = ResearchRequest::new("renewable energy").with_adapters(["gpt4", "claude"]);
        assert!(ok.validate(&configured()).is_ok());

        let zero = ok.clone().with_depth(0);
        assert_eq!(zero.validate(&configured()), Err(DomainError::InvalidDepth));

        let none = ResearchRequest::new("topic");
        assert_eq!(none.validate(&configured()), Err(DomainError::NoAdapters));

        let unknown = ResearchRequest::new("topic").with_adapters(["gpt4", "bard"]);
        assert_eq!(
            unknown.validate(&configured()),
            Err(DomainError::UnknownAdapter("bard".to_string()))
        );

        let empty = ResearchRequest::new("  ").with_adapters(["gpt4"]);
        assert!(matches!(
            empty.validate(&configured()),
            Err(DomainError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_output_language() {
        let same = ResearchRequest::new("t").with_language("en").with_target_language("en");
        assert_eq!(same.translation_target(), None);
        assert_eq!(same.output_language(), "en");

        let tr = ResearchRequest::new("t").with_language("en").with_target_language("tr");
        assert_eq!(tr.translation_target(), Some("tr"));
        assert_eq!(tr.output_language(), "tr");
    }

    #[test]
    fn test_status_transitions() {
        use ResearchStatus::*;
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Failed));
        assert!(!Completed.can_transition_to(Processing));
        assert!(!Failed.can_transition_to(Completed));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_apply_rejects_invalid_transition() {
        let request = ResearchRequest::new("t").with_adapters(["gpt4"]);
        let mut record = ResearchRecord::new(ResearchId::new("r1"), request);
        let err = record.apply(ResearchUpdate::new().status(ResearchStatus::Completed));
        assert!(err.is_err());
        assert_eq!(record.status, ResearchStatus::Pending);
    }

    #[test]
    fn test_apply_tracks_progress_and_steps() {
        let request = ResearchRequest::new("t").with_adapters(["gpt4"]);
        let mut record = ResearchRecord::new(ResearchId::new("r1"), request);
        record
            .apply(
                ResearchUpdate::new()
                    .status(ResearchStatus::Processing)
                    .progress(150),
            )
            .unwrap();
        assert_eq!(record.progress, 100);

        let response = AdapterResponse::success("gpt4", "text", "en");
        record
            .apply(ResearchUpdate::new().step(StepOutcome::completed(
                Step::new(1, "Intro", "What is it?"),
                ConsensusResult::single(&response),
                "en",
            )))
            .unwrap();
        record
            .apply(ResearchUpdate::new().step(StepOutcome::failed(
                Step::new(2, "More", "Tell more"),
                "no valid responses",
                "en",
            )))
            .unwrap();
        assert_eq!(record.successful_steps(), 1);
        assert_eq!(record.failed_steps(), 1);

        record
            .apply(ResearchUpdate::new().status(ResearchStatus::Completed))
            .unwrap();
        assert!(record.is_finished());
        assert!(record.completed_at.is_some());
    }

    #[test]
    fn test_step_outcome_serialization() {
        let outcome = StepOutcome::failed(Step::new(1, "A", "B"), "boom", "en");
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "failed");
        assert_eq!(json["error"], "boom");
        assert_eq!(json["step"]["number"], 1);
    }
}
