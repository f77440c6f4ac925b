//! Output formatter trait

use consensus_domain::{OutputFormat, ResearchRecord};

/// Trait for formatting research records
pub trait OutputFormatter {
    /// Plan, step results, article and summary
    fn format_full(&self, record: &ResearchRecord) -> String;

    /// Only the article (or the failure notice standing in for it)
    fn format_article(&self, record: &ResearchRecord) -> String;

    /// Per-step notes as Markdown
    fn format_notes(&self, record: &ResearchRecord) -> String;

    /// The whole record as JSON
    fn format_json(&self, record: &ResearchRecord) -> String;

    fn format(&self, record: &ResearchRecord, format: OutputFormat) -> String {
        match format {
            OutputFormat::Full => self.format_full(record),
            OutputFormat::Article => self.format_article(record),
            OutputFormat::Notes => self.format_notes(record),
            OutputFormat::Json => self.format_json(record),
        }
    }
}
