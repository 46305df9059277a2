//! Menu-Scout main entry point
//!
//! This is the command-line interface for the Menu-Scout menu discovery pipeline.

use anyhow::Context;
use clap::Parser;
use menu_scout::config::{load_config_with_hash, Config};
use menu_scout::crawler::Coordinator;
use menu_scout::service::GeminiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Menu-Scout: find a restaurant's menu on its website
///
/// Menu-Scout fetches the given home page, follows every link that stays on the
/// same host one hop deep, asks a generative content service which pages hold menu
/// items, and prints the extracted menu followed by its source pages.
#[derive(Parser, Debug)]
#[command(name = "menu-scout")]
#[command(version = "1.0.0")]
#[command(about = "Discover restaurant menus on a website", long_about = None)]
struct Cli {
    /// Restaurant website root URL
    #[arg(value_name = "URL")]
    url: String,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the number of concurrent classifications
    #[arg(long, value_name = "N")]
    max_concurrent: Option<u32>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Config::default()
        }
    };

    if let Some(n) = cli.max_concurrent {
        config.crawler.max_concurrent_classifications = n;
    }

    let service = GeminiClient::from_config(&config.content_service)
        .context("failed to configure the content service")?;
    tracing::info!("Using model {}", service.model());

    let coordinator = Coordinator::new(&config, Arc::new(service))
        .context("invalid crawler settings")?;
    tracing::info!(
        "Discovering menu for {} ({} classifications in flight)",
        cli.url,
        coordinator.max_concurrent()
    );

    let report = coordinator.discover_menu(&cli.url).await;
    if report.is_unreachable() {
        tracing::error!("Discovery aborted: root page unreachable");
    } else {
        tracing::info!("Discovery completed with {} menu sources", report.source_urls().len());
    }

    println!("{}", report);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("menu_scout=info,warn"),
            1 => EnvFilter::new("menu_scout=debug,info"),
            2 => EnvFilter::new("menu_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}
