//! Research notes: the per-step results with their consensus metadata.

use crate::consensus::value_objects::{ConsensusMethod, current_timestamp};
use crate::core::adapter::AdapterId;
use crate::research::entities::{StepOutcome, StepResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Notes for one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub step: usize,
    pub title: String,
    /// The sub-question of the step
    pub question: String,
    /// Consensus text (empty when the step failed)
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_content: Option<String>,
    pub consensus_score: f64,
    /// Score of every adapter that answered
    pub adapter_scores: BTreeMap<AdapterId, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<ConsensusMethod>,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: u64,
}

impl NoteEntry {
    pub fn from_outcome(outcome: &StepOutcome) -> Self {
        let mut entry = Self {
            step: outcome.step.number,
            title: outcome.step.title.clone(),
            question: outcome.step.description.clone(),
            content: String::new(),
            translated_content: None,
            consensus_score: 0.0,
            adapter_scores: BTreeMap::new(),
            method: None,
            language: outcome.language.clone(),
            target_language: None,
            error: None,
            timestamp: outcome.timestamp,
        };
        match &outcome.result {
            StepResult::Completed { consensus } => {
                entry.content = consensus.content.clone();
                entry.translated_content = consensus.translated_content.clone();
                entry.consensus_score = consensus.score;
                entry.adapter_scores = consensus.scores.clone();
                entry.method = Some(consensus.method);
                entry.target_language = consensus.target_language.clone();
            }
            StepResult::Failed { error } => {
                entry.error = Some(error.clone());
            }
        }
        entry
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Notes document of a research run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchNotes {
    pub entries: Vec<NoteEntry>,
    /// Step contents joined by blank lines
    pub combined: String,
    pub language: String,
    pub total_steps: usize,
    pub successful_steps: usize,
    pub generated_at: u64,
}

impl ResearchNotes {
    pub fn from_outcomes(outcomes: &[StepOutcome], language: impl Into<String>) -> Self {
        let entries: Vec<NoteEntry> = outcomes.iter().map(NoteEntry::from_outcome).collect();
        let combined = entries
            .iter()
            .map(|e| e.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let successful_steps = entries.iter().filter(|e| e.is_success()).count();
        Self {
            total_steps: entries.len(),
            successful_steps,
            combined,
            entries,
            language: language.into(),
            generated_at: current_timestamp(),
        }
    }

    /// Render as Markdown, one section per step
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            out.push_str(&format!("## {}. {}\n\n", entry.step, entry.title));
            match &entry.error {
                Some(error) => out.push_str(&format!("_Step failed: {}_\n\n", error)),
                None => {
                    let text = entry.translated_content.as_deref().unwrap_or(&entry.content);
                    out.push_str(text.trim_end());
                    out.push_str("\n\n");
                    if let Some(method) = entry.method {
                        out.push_str(&format!(
                            "_Consensus: {} (score {:.2})_\n\n",
                            method, entry.consensus_score
                        ));
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::value_objects::{AdapterResponse, ConsensusResult};
    use crate::research::entities::Step;

    fn outcomes() -> Vec<StepOutcome> {
        let ok = ConsensusResult::single(&AdapterResponse::success("gpt4", "First finding", "en"))
            .with_translation("İlk bulgu", "tr");
        vec![
            StepOutcome::completed(Step::new(1, "Initial Research", "Gather info"), ok, "en"),
            StepOutcome::failed(Step::new(2, "Key Concepts", "Research concepts"), "boom", "en"),
        ]
    }

    #[test]
    fn test_notes_totals() {
        let notes = ResearchNotes::from_outcomes(&outcomes(), "en");
        assert_eq!(notes.total_steps, 2);
        assert_eq!(notes.successful_steps, 1);
        assert_eq!(notes.combined, "First finding\n\n");
    }

    #[test]
    fn test_entry_metadata() {
        let notes = ResearchNotes::from_outcomes(&outcomes(), "en");
        let first = &notes.entries[0];
        assert_eq!(first.method, Some(ConsensusMethod::Single));
        assert_eq!(first.translated_content.as_deref(), Some("İlk bulgu"));
        assert_eq!(first.target_language.as_deref(), Some("tr"));

        let second = &notes.entries[1];
        assert_eq!(second.error.as_deref(), Some("boom"));
        assert!(second.content.is_empty());
    }

    #[test]
    fn test_markdown_prefers_translation() {
        let notes = ResearchNotes::from_outcomes(&outcomes(), "en");
        let md = notes.to_markdown();
        assert!(md.contains("## 1. Initial Research"));
        assert!(md.contains("İlk bulgu"));
        assert!(md.contains("_Step failed: boom_"));
    }
}
