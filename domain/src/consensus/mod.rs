//! Consensus domain
//!
//! Everything needed to turn several adapters' answers to the same prompt
//! into one trusted answer, without performing any I/O:
//!
//! - [`similarity`] - term-frequency cosine similarity and the pairwise matrix
//! - [`scoring`] - the five weighted scoring signals
//! - [`selection`] - ranking and near-tie detection
//! - [`ranking`] - language-aware adapter ordering
//! - [`category`] - prompt/topic categorization
//! - [`weights`] - per-user feedback weights

pub mod category;
pub mod ranking;
pub mod scoring;
pub mod selection;
pub mod similarity;
pub mod value_objects;
pub mod weights;
