//! Jule Dashboard
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Read from `--config`, or the first of
//! `~/.config/jule-dashboard/config.toml`, `/etc/jule-dashboard/config.toml`
//! and `./config.toml`, with `JULE_DASHBOARD_*` environment overrides.
//! `RUST_LOG` takes precedence over the configured log level.

use anyhow::Context;
use clap::{Parser, Subcommand};
use jule_dashboard::config::{generate_default_config, Config, LoggingConfig};
use jule_dashboard::refresh::{RefreshOrchestrator, Trigger, TriggerOutcome};
use jule_dashboard::server::{serve, AppState};
use jule_dashboard::{Dashboard, HttpBackend};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "jule-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard for the Jule community bot statistics API")]
struct Cli {
    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard server with periodic refresh
    Serve,

    /// Run one refresh cycle and print the document as JSON
    Snapshot {
        /// Print only this region
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Print a default config file
    Config {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        return write_default_config(output.as_deref());
    }

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_default(),
    };

    init_tracing(&config.logging);

    match cli.command {
        Commands::Serve => run_server(config).await,
        Commands::Snapshot { region } => run_snapshot(config, region).await,
        Commands::Config { .. } => Ok(()),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("jule_dashboard={},tower_http={}", logging.level, logging.level).into()
    });

    let (json, pretty) = if logging.is_json() {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(pretty)
        .init();
}

fn build_orchestrator(config: &Config) -> anyhow::Result<Arc<RefreshOrchestrator>> {
    let backend = HttpBackend::new(config.backend.to_backend_config())
        .context("building backend client")?;
    let dashboard = Arc::new(Dashboard::new(Arc::new(backend), config.panels.clone()));

    Ok(Arc::new(RefreshOrchestrator::new(
        dashboard,
        config.refresh.to_refresh_config(),
    )))
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Jule dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(backend = %config.backend.url, "Using statistics backend");

    let orchestrator = build_orchestrator(&config)?;
    let tasks = Arc::clone(&orchestrator).start().await;

    let result = serve(AppState::new(Arc::clone(&orchestrator)), &config.server).await;

    orchestrator.stop().await;
    tasks.refresh.abort();
    tasks.clock.abort();
    tracing::info!("Jule dashboard stopped");

    result.context("running dashboard server")
}

async fn run_snapshot(config: Config, region: Option<String>) -> anyhow::Result<()> {
    let orchestrator = build_orchestrator(&config)?;

    if let TriggerOutcome::Completed(report) = orchestrator.trigger(Trigger::Manual).await {
        for outcome in report.panels.iter().filter(|p| !p.is_rendered()) {
            tracing::warn!(panel = %outcome.panel, "Panel failed during snapshot");
        }
    }

    let doc = orchestrator.dashboard().snapshot().await;
    let json = match region {
        Some(id) => {
            let element = doc
                .get(&id)
                .with_context(|| format!("no region with id {}", id))?;
            serde_json::to_string_pretty(element)?
        }
        None => serde_json::to_string_pretty(&doc)?,
    };

    println!("{}", json);
    Ok(())
}

fn write_default_config(output: Option<&std::path::Path>) -> anyhow::Result<()> {
    let content = generate_default_config();

    match output {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Wrote default config to {}", path.display());
        }
        None => print!("{}", content),
    }

    Ok(())
}
