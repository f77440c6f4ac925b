//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod plan_research;
pub mod record_feedback;
pub mod resolve_consensus;
pub mod retry;
pub mod run_research;
pub(crate) mod shared;
