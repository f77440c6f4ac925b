//! Domain layer for consensus-research
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Consensus
//!
//! Several adapters answer the same prompt. Their answers are compared
//! pairwise, scored on five weighted signals, and either the best one is
//! taken or the two near-tied leaders are merged into one answer.
//!
//! ## Research
//!
//! A topic is decomposed into steps; each step is resolved by consensus,
//! then the step results are synthesized into an article and notes and
//! the run is given a quality score.

pub mod config;
pub mod consensus;
pub mod core;
pub mod prompt;
pub mod research;

// Re-export commonly used types
pub use consensus::{
    category::{PromptCategory, TopicCategory},
    ranking::{best_adapters_for_language, language_fitness, order_by_language_fitness},
    scoring::{ScoreBreakdown, ScoreWeights, ScoringContext, score_breakdown, score_response},
    selection::{DEFAULT_NEAR_TIE_THRESHOLD, RankedScore, Selection, rank, select},
    similarity::{SimilarityMatrix, similarity},
    value_objects::{AdapterResponse, ConsensusMethod, ConsensusResult},
    weights::{DEFAULT_USER_WEIGHT, ModelRating, UserWeights},
};
pub use config::OutputFormat;
pub use core::{
    adapter::{AdapterId, AdapterProfile, CoverageTier},
    error::DomainError,
    language::{DEFAULT_LANGUAGE, LanguageFamily, LanguageInfo, Script},
};
pub use prompt::PromptTemplate;
pub use research::{
    article::{Article, Section, extract_structure, reading_time},
    entities::{
        DEFAULT_DEPTH, ResearchId, ResearchRecord, ResearchRequest, ResearchStatus, ResearchUpdate,
        Step, StepOutcome, StepResult,
    },
    notes::{NoteEntry, ResearchNotes},
    plan::{fallback_steps, normalize_to_depth, parse_plan_steps},
    quality::quality_score,
};
