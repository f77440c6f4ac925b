//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for research results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plan, step results, article and summary
    Full,
    /// Only the final article
    Article,
    /// Per-step research notes as Markdown
    Notes,
    /// The whole research record as JSON
    Json,
}

impl From<OutputFormat> for consensus_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => consensus_domain::OutputFormat::Full,
            OutputFormat::Article => consensus_domain::OutputFormat::Article,
            OutputFormat::Notes => consensus_domain::OutputFormat::Notes,
            OutputFormat::Json => consensus_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for consensus-research
#[derive(Parser, Debug)]
#[command(name = "consensus-research")]
#[command(author, version, about = "Multi-model research - several LLMs answer every step and agree on one result")]
#[command(long_about = r#"
Consensus Research plans a topic into steps and asks several LLM providers
every step in parallel. The answers are scored against each other and either
the best one is kept or the two leading answers are merged.

The run has four phases:
1. Planning: one model splits the topic into research steps
2. Research: every step is answered by all selected models and reconciled
3. Article: the step findings are synthesized into a structured article
4. Notes & quality: per-step notes and a quality score are derived

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./consensus.toml      Project-level config
3. ~/.config/consensus-research/config.toml   Global config

API keys are read from <PROVIDER>_API_KEY (OPENAI_API_KEY, ANTHROPIC_API_KEY, ...).

Example:
  consensus-research "Renewable energy storage"
  consensus-research -a gpt4 -a claude --depth 3 "Quantum error correction"
  consensus-research --language tr --target-language en -o notes "Osmanlı mimarisi"
"#)]
pub struct Cli {
    /// The topic to research (not required with --show-config)
    pub topic: Option<String>,

    /// Additional context for the topic
    #[arg(short, long, value_name = "TEXT")]
    pub description: Option<String>,

    /// Number of research steps
    #[arg(long, value_name = "N")]
    pub depth: Option<usize>,

    /// Language the research is conducted in (e.g. en, tr, de)
    #[arg(short, long, value_name = "CODE")]
    pub language: Option<String>,

    /// Deliver step results and the article in this language
    #[arg(short, long, value_name = "CODE")]
    pub target_language: Option<String>,

    /// Adapters to query for every step (can be specified multiple times)
    #[arg(short, long, value_name = "ADAPTER")]
    pub adapter: Vec<String>,

    /// User whose feedback weights apply to scoring
    #[arg(long, value_name = "NAME")]
    pub user: Option<String>,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Append research step events to this JSONL file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}
