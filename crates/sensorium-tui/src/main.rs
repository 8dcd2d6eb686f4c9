//! `sensorium` — real-time terminal dashboard for one environmental sensor
//! station.
//!
//! Polls the station's data endpoint on a fixed cadence and renders the
//! latest reading as four text fields plus a chart. Built on
//! [ratatui](https://ratatui.rs) with readings streamed from
//! `sensorium-core`'s [`Poller`](sensorium_core::Poller).
//!
//! Logs are written to a file (default `/tmp/sensorium.log`) to avoid
//! corrupting the terminal UI. A background data bridge task forwards every
//! applied reading into the TUI action loop.
//!
//! Entry point: CLI argument parsing, tracing setup, panic hooks, and app
//! launch.

mod action;
mod app;
mod component;
mod data_bridge;
mod event;
mod screens;
mod theme;
mod tui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use sensorium_config::Config;
use sensorium_core::Poller;

use crate::app::App;

const DEFAULT_LOG_FILE: &str = "/tmp/sensorium.log";

/// Terminal dashboard for an environmental sensor station.
#[derive(Parser, Debug)]
#[command(name = "sensorium", version, about)]
struct Cli {
    /// Station data endpoint URL (e.g., http://192.168.141.172:8080/data_endpoint)
    #[arg(short = 'e', long, env = "SENSORIUM_ENDPOINT")]
    endpoint: Option<String>,

    /// Poll cadence in milliseconds
    #[arg(short = 'i', long, env = "SENSORIUM_POLL_INTERVAL_MS")]
    poll_interval_ms: Option<u64>,

    /// Config file path (defaults to the platform config directory)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Log file path (defaults to /tmp/sensorium.log)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Set up file-based tracing. We MUST NOT log to stdout/stderr — that would
/// corrupt the TUI output. Returns a guard that must be held for the
/// lifetime of the application to ensure logs are flushed.
fn setup_tracing(cli: &Cli, config: &Config) -> WorkerGuard {
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sensorium={log_level}")));

    let log_file = config
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    let log_dir = log_file
        .parent()
        .unwrap_or(std::path::Path::new("/tmp"));
    let log_filename = log_file
        .file_name()
        .unwrap_or(std::ffi::OsStr::new("sensorium.log"));

    let file_appender = tracing_appender::rolling::never(log_dir, log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}

/// Load layered config, then apply CLI flags on top (highest precedence).
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => sensorium_config::load_config_from(path)
            .wrap_err_with(|| format!("failed to load config from {}", path.display()))?,
        None => sensorium_config::load_config().wrap_err("failed to load config")?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = Some(endpoint.clone());
    }
    if let Some(interval) = cli.poll_interval_ms {
        config.poll_interval_ms = interval;
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Install panic/error hooks BEFORE entering the terminal
    tui::install_hooks()?;

    let config = load_config(&cli)?;

    // Tracing to file — hold the guard so logs flush on exit
    let _log_guard = setup_tracing(&cli, &config);

    let poller_config = config.to_poller_config()?;
    info!(
        endpoint = %poller_config.endpoint,
        interval_ms = %poller_config.interval.as_millis(),
        "starting sensorium"
    );

    let poller = Poller::new(&poller_config)?;
    let readings = poller.readings();
    let health = poller.health();
    poller.spawn();

    let mut app = App::new();
    let cancel = CancellationToken::new();
    let bridge = tokio::spawn(data_bridge::run_data_bridge(
        readings,
        health,
        app.action_sender(),
        cancel.clone(),
    ));

    let result = app.run().await;

    poller.stop();
    cancel.cancel();
    let _ = bridge.await;

    result
}
