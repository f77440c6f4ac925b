//! Logging infrastructure: structured research event logging.
//!
//! Provides [`JsonlResearchLogger`], a JSONL file writer that implements
//! the [`ResearchLogger`](consensus_application::ResearchLogger) port.

mod research_log;

pub use research_log::JsonlResearchLogger;
