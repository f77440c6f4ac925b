//! Research domain
//!
//! Requests, plans, step outcomes and the derived article, notes and
//! quality score of a research run.

pub mod article;
pub mod entities;
pub mod notes;
pub mod plan;
pub mod quality;
