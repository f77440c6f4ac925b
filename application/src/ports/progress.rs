//! Progress notification port
//!
//! Defines the interface for reporting progress during a research run.

use consensus_domain::{AdapterId, ResearchStatus, Step, StepOutcome};

/// Callback for progress updates during research execution
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called whenever the record's status or progress percentage changes
    fn on_progress(&self, status: ResearchStatus, progress: u8);

    /// Called when a step starts
    fn on_step_start(&self, step: &Step, total_steps: usize);

    /// Called when a step finishes, successfully or not
    fn on_step_complete(&self, outcome: &StepOutcome, total_steps: usize);

    // ==================== Fine-grained Callbacks ====================

    /// Called once the plan is fixed
    fn on_plan_ready(&self, _steps: &[Step]) {}

    /// Called when one adapter finishes answering within a consensus round
    fn on_adapter_complete(&self, _adapter: &AdapterId, _success: bool) {}

    /// Called when article synthesis starts
    fn on_article_start(&self) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_progress(&self, _status: ResearchStatus, _progress: u8) {}
    fn on_step_start(&self, _step: &Step, _total_steps: usize) {}
    fn on_step_complete(&self, _outcome: &StepOutcome, _total_steps: usize) {}
}
