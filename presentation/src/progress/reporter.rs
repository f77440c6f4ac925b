//! Progress reporting for research execution

use colored::Colorize;
use consensus_application::ProgressNotifier;
use consensus_domain::{AdapterId, ResearchStatus, Step, StepOutcome};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports progress during a research run with progress bars
///
/// One overall bar tracks the record's percentage; each running step gets
/// a spinner that lists the adapters as they answer.
pub struct ProgressReporter {
    multi: MultiProgress,
    overall: ProgressBar,
    step_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let overall = multi.add(ProgressBar::new(100));
        overall.set_style(Self::overall_style());
        overall.set_prefix("Research");
        overall.set_message("Starting...");
        Self {
            multi,
            overall,
            step_bar: Mutex::new(None),
        }
    }

    fn overall_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("  {spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn status_message(status: ResearchStatus) -> String {
        match status {
            ResearchStatus::Pending => "pending".dimmed().to_string(),
            ResearchStatus::Processing => "processing".to_string(),
            ResearchStatus::Completed => "completed".green().to_string(),
            ResearchStatus::Failed => "failed".red().to_string(),
        }
    }

    fn step_prefix(step: &Step, total_steps: usize) -> String {
        format!("Step {}/{}", step.number, total_steps)
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_progress(&self, status: ResearchStatus, progress: u8) {
        self.overall.set_position(u64::from(progress));
        if status.is_terminal() {
            self.overall
                .finish_with_message(Self::status_message(status));
        } else {
            self.overall.set_message(Self::status_message(status));
        }
    }

    fn on_plan_ready(&self, steps: &[Step]) {
        let _ = self.multi.println(format!(
            "{} {} steps planned",
            "->".cyan(),
            steps.len()
        ));
        for step in steps {
            let _ = self
                .multi
                .println(format!("   {}. {}", step.number, step.title.bold()));
        }
    }

    fn on_step_start(&self, step: &Step, total_steps: usize) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(Self::step_prefix(step, total_steps));
        pb.set_message(step.title.clone());
        pb.enable_steady_tick(Duration::from_millis(120));

        if let Ok(mut bar) = self.step_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_adapter_complete(&self, adapter: &AdapterId, success: bool) {
        if let Ok(bar) = self.step_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), adapter)
            } else {
                format!("{} {}", "x".red(), adapter)
            };
            pb.set_message(status);
        }
    }

    fn on_step_complete(&self, outcome: &StepOutcome, _total_steps: usize) {
        let Ok(mut bar) = self.step_bar.lock() else {
            return;
        };
        if let Some(pb) = bar.take() {
            let message = match outcome.consensus() {
                Some(consensus) => format!(
                    "{} {} ({}, {})",
                    "v".green(),
                    outcome.step.title,
                    consensus.method,
                    consensus.primary
                ),
                None => format!("{} {} (failed)", "x".red(), outcome.step.title),
            };
            pb.finish_with_message(message);
        }
    }

    fn on_article_start(&self) {
        self.overall.set_message("writing article...");
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_progress(&self, status: ResearchStatus, progress: u8) {
        println!("{} [{:>3}%] {}", "->".cyan(), progress, status);
    }

    fn on_plan_ready(&self, steps: &[Step]) {
        for step in steps {
            println!("   {}. {}", step.number, step.title);
        }
    }

    fn on_step_start(&self, step: &Step, total_steps: usize) {
        println!(
            "{} {}",
            ProgressReporter::step_prefix(step, total_steps).bold(),
            step.title
        );
    }

    fn on_adapter_complete(&self, adapter: &AdapterId, success: bool) {
        if success {
            println!("  {} {}", "v".green(), adapter);
        } else {
            println!("  {} {} (failed)", "x".red(), adapter);
        }
    }

    fn on_step_complete(&self, outcome: &StepOutcome, _total_steps: usize) {
        if let Some(error) = outcome.error() {
            println!("  {} {}", "step failed:".red(), error);
        }
    }

    fn on_article_start(&self) {
        println!("{} writing article", "->".cyan());
    }
}
