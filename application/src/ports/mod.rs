//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod feedback_store;
pub mod localization;
pub mod model_adapter;
pub mod progress;
pub mod research_logger;
pub mod research_store;
