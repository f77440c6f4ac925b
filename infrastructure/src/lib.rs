//! Infrastructure layer for consensus-research
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: HTTP model providers, in-memory stores,
//! the message catalog, the JSONL research log and configuration loading.

pub mod config;
pub mod localization;
pub mod logging;
pub mod providers;
pub mod store;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigLoader, FileConfig, FileOutputConfig, Severity};
pub use localization::StaticLocalizer;
pub use logging::JsonlResearchLogger;
pub use providers::{
    AnthropicAdapter, GeminiAdapter, OpenAiCompatAdapter, REQUEST_TIMEOUT, build_registry,
};
pub use store::{InMemoryFeedbackStore, InMemoryResearchStore};
