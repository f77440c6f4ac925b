//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`ConsensusParams`]: scoring weights, near-tie threshold, retry and timeout
//! - [`ResearchParams`]: planning adapter and request defaults

pub mod consensus_params;
pub mod research_params;

pub use consensus_params::{ConsensusParams, RetryPolicy};
pub use research_params::ResearchParams;
