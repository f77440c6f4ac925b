//! Console output formatter for research records

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use consensus_domain::{ResearchRecord, ResearchStatus, StepOutcome};

/// Formats research records for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete record
    pub fn format_full(record: &ResearchRecord) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Consensus Research"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Topic:".cyan().bold(),
            record.request.topic
        ));
        if !record.request.description.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Description:".cyan().bold(),
                record.request.description
            ));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Language:".cyan().bold(),
            Self::language_line(record)
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Adapters:".cyan().bold(),
            record
                .request
                .adapters
                .iter()
                .map(|a| a.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.push_str(&format!(
            "{} {} ({})\n",
            "Status:".cyan().bold(),
            Self::status_label(record.status),
            record.category
        ));
        if let Some(error) = &record.error {
            output.push_str(&format!("{} {}\n", "Error:".red().bold(), error));
        }

        if !record.plan.is_empty() {
            output.push_str(&Self::section_header("Research Plan"));
            for step in &record.plan {
                output.push_str(&format!("  {}. {}\n", step.number, step.title.bold()));
                output.push_str(&format!("     {}\n", step.description.dimmed()));
            }
        }

        if !record.steps.is_empty() {
            output.push_str(&Self::section_header("Step Results"));
            for outcome in &record.steps {
                output.push_str(&Self::format_step(outcome));
            }
        }

        if let Some(article) = &record.article {
            output.push_str(&Self::section_header("Article"));
            output.push_str(&format!("\n{}\n\n", article.title.bold()));
            output.push_str(article.content.trim_end());
            output.push('\n');
        }

        if record.status == ResearchStatus::Completed {
            output.push_str(&Self::section_header("Summary"));
            output.push_str(&format!(
                "  {} {}/{}\n",
                "Successful steps:".dimmed(),
                record.successful_steps(),
                record.steps.len()
            ));
            if let Some(score) = record.quality_score {
                output.push_str(&format!("  {} {:.2}\n", "Quality score:".dimmed(), score));
            }
            output.push_str(&format!(
                "  {} {} words, {} characters, ~{} min read\n",
                "Length:".dimmed(),
                record.word_count,
                record.char_count,
                record.reading_time
            ));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the article only (concise output)
    pub fn format_article(record: &ResearchRecord) -> String {
        match &record.article {
            Some(article) => format!(
                "{}\n\n{}\n",
                format!("# {}", article.title).bold(),
                article.content.trim_end()
            ),
            None => Self::no_output(record, "No article was produced."),
        }
    }

    /// Format the research notes as Markdown
    pub fn format_notes(record: &ResearchRecord) -> String {
        match &record.notes {
            Some(notes) => notes.to_markdown(),
            None => Self::no_output(record, "No notes were produced."),
        }
    }

    /// Format as JSON
    pub fn format_json(record: &ResearchRecord) -> String {
        serde_json::to_string_pretty(record).unwrap_or_else(|_| "{}".to_string())
    }

    fn format_step(outcome: &StepOutcome) -> String {
        let title = format!("── {}. {} ──", outcome.step.number, outcome.step.title);
        match outcome.consensus() {
            Some(consensus) => {
                let mut meta = format!(
                    "{} by {} (score {:.2})",
                    consensus.method, consensus.primary, consensus.score
                );
                if let Some(secondary) = &consensus.secondary {
                    meta.push_str(&format!(", merged with {}", secondary));
                }
                format!(
                    "\n{}\n{}\n{}\n",
                    title.yellow().bold(),
                    meta.dimmed(),
                    consensus.display_content().trim_end()
                )
            }
            None => format!(
                "\n{}\nError: {}\n",
                title.red().bold(),
                outcome.error().unwrap_or("Unknown")
            ),
        }
    }

    fn language_line(record: &ResearchRecord) -> String {
        match record.request.translation_target() {
            Some(target) => format!("{} -> {}", record.request.language, target),
            None => record.request.language.clone(),
        }
    }

    fn status_label(status: ResearchStatus) -> String {
        match status {
            ResearchStatus::Completed => status.as_str().green().bold().to_string(),
            ResearchStatus::Failed => status.as_str().red().bold().to_string(),
            _ => status.as_str().yellow().to_string(),
        }
    }

    fn no_output(record: &ResearchRecord, fallback: &str) -> String {
        match &record.error {
            Some(error) => format!("{} {}\n", "Research failed:".red().bold(), error),
            None => format!("{}\n", fallback),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_full(&self, record: &ResearchRecord) -> String {
        Self::format_full(record)
    }

    fn format_article(&self, record: &ResearchRecord) -> String {
        Self::format_article(record)
    }

    fn format_notes(&self, record: &ResearchRecord) -> String {
        Self::format_notes(record)
    }

    fn format_json(&self, record: &ResearchRecord) -> String {
        Self::format_json(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consensus_domain::{
        AdapterResponse, Article, ConsensusResult, OutputFormat, ResearchId, ResearchNotes,
        ResearchRequest, ResearchUpdate, Step,
    };

    fn completed_record() -> ResearchRecord {
        colored::control::set_override(false);
        let request = ResearchRequest::new("Renewable energy").with_adapters(["gpt4", "claude"]);
        let mut record = ResearchRecord::new(ResearchId::new("r-1"), request);
        let plan = vec![
            Step::new(1, "Origins", "Trace the history"),
            Step::new(2, "Outlook", "Predict the future"),
        ];
        let steps = vec![
            StepOutcome::completed(
                plan[0].clone(),
                ConsensusResult::single(&AdapterResponse::success("gpt4", "Solar came first.", "en")),
                "en",
            ),
            StepOutcome::failed(plan[1].clone(), "No valid responses from AI models", "en"),
        ];
        let article = Article::new("Renewable energy", "Introduction\nSolar came first.", "en", "en");
        let notes = ResearchNotes::from_outcomes(&steps, "en");

        record
            .apply(
                ResearchUpdate::new()
                    .status(ResearchStatus::Processing)
                    .plan(plan),
            )
            .unwrap();
        for step in steps {
            record.apply(ResearchUpdate::new().step(step)).unwrap();
        }
        record
            .apply(
                ResearchUpdate::new()
                    .article(article)
                    .notes(notes)
                    .quality_score(0.42)
                    .status(ResearchStatus::Completed)
                    .progress(100),
            )
            .unwrap();
        record
    }

    #[test]
    fn test_full_output_lists_steps_and_summary() {
        let output = ConsoleFormatter::format_full(&completed_record());
        assert!(output.contains("Renewable energy"));
        assert!(output.contains("1. Origins"));
        assert!(output.contains("Solar came first."));
        assert!(output.contains("Error: No valid responses from AI models"));
        assert!(output.contains("Successful steps: 1/2"));
        assert!(output.contains("Quality score: 0.42"));
    }

    #[test]
    fn test_article_output() {
        let output = ConsoleFormatter::format_article(&completed_record());
        assert!(output.starts_with("# Renewable energy"));
        assert!(output.contains("Introduction\nSolar came first."));
    }

    #[test]
    fn test_failed_record_reports_error() {
        colored::control::set_override(false);
        let request = ResearchRequest::new("Topic").with_adapters(["gpt4"]);
        let mut record = ResearchRecord::new(ResearchId::new("r-2"), request);
        record
            .apply(
                ResearchUpdate::new()
                    .status(ResearchStatus::Failed)
                    .error("research_cancelled"),
            )
            .unwrap();

        assert_eq!(
            ConsoleFormatter::format_article(&record),
            "Research failed: research_cancelled\n"
        );
        assert!(ConsoleFormatter::format_notes(&record).contains("research_cancelled"));
    }

    #[test]
    fn test_json_output_is_the_record() {
        let record = completed_record();
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter.format(&record, OutputFormat::Json)).unwrap();
        assert_eq!(json["id"], "r-1");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["steps"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_notes_output_uses_markdown() {
        let output = ConsoleFormatter.format(&completed_record(), OutputFormat::Notes);
        assert!(output.contains("## 1. Origins"));
        assert!(output.contains("_Step failed: No valid responses from AI models_"));
    }
}
