//! Configuration file loading for consensus-research
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `CONSENSUS_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./consensus.toml` or `./.consensus.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/consensus-research/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, DEFAULT_TEMPERATURE, FileAdapterConfig, FileAdaptersConfig, FileConfig,
    FileConsensusConfig, FileLoggingConfig, FileOutputConfig, FileProviderConfig,
    FileProvidersConfig, FileResearchConfig, ProviderSettings, Severity, WireFormat,
    provider_defaults,
};
pub use loader::ConfigLoader;
