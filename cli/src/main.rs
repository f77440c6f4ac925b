//! CLI entrypoint for Consensus Research
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use consensus_application::{
    AdapterRegistry, ConsensusEngine, NoProgress, ResearchLogger, ResearchParams,
    RunResearchUseCase,
};
use consensus_domain::{AdapterId, OutputFormat, ResearchRequest, ResearchStatus};
use consensus_infrastructure::{
    ConfigIssue, ConfigLoader, FileConfig, InMemoryFeedbackStore, InMemoryResearchStore,
    JsonlResearchLogger, REQUEST_TIMEOUT, Severity, StaticLocalizer, build_registry,
};
use consensus_presentation::{Cli, ConsoleFormatter, OutputFormatter, ProgressReporter};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new(config.logging.level.as_deref().unwrap_or("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting Consensus Research");

    report_issues(&config.validate())?;

    let Some(topic) = cli.topic.clone() else {
        bail!("A topic is required. Run with --help for usage.");
    };

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let (consensus_params, _) = config.consensus.to_params();
    let (research_params, _) = config.research.to_params();

    let registry = Arc::new(build_registry(
        config.adapters.profiles(),
        &config.providers,
        consensus_params.call_timeout.unwrap_or(REQUEST_TIMEOUT),
    ));
    if registry.is_empty() {
        bail!("No adapters are configured.");
    }

    let localizer = Arc::new(StaticLocalizer::new());
    let engine = Arc::new(
        ConsensusEngine::new(registry.clone(), localizer.clone())
            .with_feedback(Arc::new(InMemoryFeedbackStore::new()))
            .with_params(consensus_params),
    );

    let cancellation = CancellationToken::new();
    spawn_ctrl_c_handler(cancellation.clone());

    let mut use_case = RunResearchUseCase::new(
        Arc::new(InMemoryResearchStore::new()),
        engine,
        localizer,
    )
    .with_params(research_params.clone())
    .with_cancellation(cancellation);

    let log_path = cli.log_file.clone().or(config.logging.research_log.clone());
    if let Some(path) = log_path {
        match JsonlResearchLogger::new(&path) {
            Some(logger) => {
                info!(path = %path.display(), "Logging research events");
                use_case = use_case.with_logger(Arc::new(logger) as Arc<dyn ResearchLogger>);
            }
            None => warn!(path = %path.display(), "Research event log disabled"),
        }
    }

    let request = build_request(&cli, topic, &config, &research_params, &registry);

    if !cli.quiet {
        print_header(&request);
    }

    // Execute with or without progress reporting
    let record = if cli.quiet {
        use_case.run(request, &NoProgress).await?
    } else {
        let progress = ProgressReporter::new();
        use_case.run(request, &progress).await?
    };

    let format = cli
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    println!("{}", ConsoleFormatter.format(&record, format));

    if record.status == ResearchStatus::Failed {
        std::process::exit(1);
    }
    Ok(())
}

/// Print configuration issues; fail when any of them is an error
fn report_issues(issues: &[ConfigIssue]) -> Result<()> {
    for issue in issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue),
            Severity::Error => eprintln!("config error: {}", issue),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration");
    }
    Ok(())
}

/// Merge command line arguments over the configured research defaults
fn build_request(
    cli: &Cli,
    topic: String,
    config: &FileConfig,
    params: &ResearchParams,
    registry: &AdapterRegistry,
) -> ResearchRequest {
    let adapters: Vec<AdapterId> = if !cli.adapter.is_empty() {
        cli.adapter.iter().map(|a| AdapterId::from(a.as_str())).collect()
    } else if !config.research.adapters.is_empty() {
        config.research.adapter_ids()
    } else {
        registry.ids()
    };

    let mut request = ResearchRequest::new(topic)
        .with_language(
            cli.language
                .clone()
                .unwrap_or_else(|| params.default_language.clone()),
        )
        .with_depth(cli.depth.unwrap_or(params.default_depth))
        .with_adapters(adapters);
    if let Some(description) = &cli.description {
        request = request.with_description(description.clone());
    }
    if let Some(target) = &cli.target_language {
        request = request.with_target_language(target.clone());
    }
    if let Some(user) = &cli.user {
        request = request.with_user(user.clone());
    }
    request
}

fn print_header(request: &ResearchRequest) {
    println!();
    println!("+============================================================+");
    println!("|           Consensus Research                               |");
    println!("+============================================================+");
    println!();
    println!("Topic: {}", request.topic);
    println!(
        "Adapters: {}",
        request
            .adapters
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Depth: {}", request.depth);
    println!();
}

fn spawn_ctrl_c_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCancelling after the current step...");
            token.cancel();
        }
    });
}
