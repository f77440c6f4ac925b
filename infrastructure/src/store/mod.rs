//! In-memory implementations of the storage ports

mod feedback;
mod research;

pub use feedback::InMemoryFeedbackStore;
pub use research::InMemoryResearchStore;
