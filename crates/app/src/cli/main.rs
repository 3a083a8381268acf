//! venue-report: summarize VENUE Patch List / System Info exports

mod report;

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use venue_core::{ExtractorConfig, Venue};
use venue_infra::HtmlDocument;

#[derive(Parser)]
#[command(name = "venue-report")]
#[command(about = "Extract show metadata and I/O devices from VENUE report exports", long_about = None)]
struct Cli {
    /// Patch List or System Info HTML exports
    #[arg(required_unless_present = "print_config")]
    files: Vec<PathBuf>,

    /// TOML file overriding the built-in document locations
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print one JSON object per file
    #[arg(long)]
    json: bool,

    /// List input channels by clean name
    #[arg(long)]
    channels: bool,

    /// Print the effective configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

async fn load_config(path: Option<&Path>) -> anyhow::Result<ExtractorConfig> {
    let Some(path) = path else {
        return Ok(ExtractorConfig::default());
    };
    info!(path = %path.display(), "Loading configuration");
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    ExtractorConfig::from_toml_str(&contents).with_context(|| format!("parsing {}", path.display()))
}

async fn parse_file(path: &Path, config: &ExtractorConfig) -> anyhow::Result<Venue> {
    let html = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    let doc = HtmlDocument::parse(&html).with_context(|| format!("loading {}", path.display()))?;
    Venue::from_document(&doc, config).with_context(|| format!("parsing {}", path.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref()).await?;
    if cli.print_config {
        print!("{}", config.to_toml_string()?);
        return Ok(ExitCode::SUCCESS);
    }

    let mut failures = 0usize;
    for path in &cli.files {
        match parse_file(path, &config).await {
            Ok(venue) => {
                let out = if cli.json {
                    serde_json::to_string(&report::Summary::new(path, &venue, cli.channels))?
                } else {
                    report::render_text(path, &venue, cli.channels)
                };
                println!("{out}");
            }
            Err(e) => {
                failures += 1;
                error!("{e:#}");
            }
        }
    }

    if failures > 0 {
        error!(failures, total = cli.files.len(), "Some reports could not be parsed");
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}
