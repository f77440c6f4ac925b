//! Application layer for consensus-research
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{ConsensusParams, ResearchParams, RetryPolicy};
pub use ports::{
    feedback_store::FeedbackStore,
    localization::{KeyLocalizer, Localizer, apply_params, keys},
    model_adapter::{AdapterError, AdapterFailure, AdapterRegistry, ModelAdapter},
    progress::{NoProgress, ProgressNotifier},
    research_logger::{NoResearchLogger, ResearchEvent, ResearchLogger},
    research_store::{ResearchStore, StoreError},
};
pub use use_cases::plan_research::{PlanInput, PlanResearchUseCase};
pub use use_cases::record_feedback::{FeedbackError, FeedbackInput, RecordFeedbackUseCase};
pub use use_cases::resolve_consensus::{ConsensusEngine, ConsensusError, ResolveInput};
pub use use_cases::run_research::{PipelineError, RunResearchUseCase};
