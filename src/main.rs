//! Pinggraph binary entry point.
//!
//! Wires configuration, the prober, and the terminal front-end together.
//! Core functionality is provided by the `pinggraph` library crate.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use pinggraph::config::{parse_duration, AppConfig};
use pinggraph::probe::{DemoProber, PingProber, Prober};
use pinggraph::ui::App;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Pinggraph - ICMP latency sampler with a live terminal chart
#[derive(Parser, Debug)]
#[command(name = "pinggraph", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "PINGGRAPH_CONFIG")]
    config: Option<String>,

    /// Probe target host (overrides config file)
    #[arg(long, env = "PINGGRAPH_TARGET")]
    target: Option<String>,

    /// Probe interval, e.g. "1s" (overrides config file)
    #[arg(long, env = "PINGGRAPH_INTERVAL", value_parser = parse_duration)]
    interval: Option<Duration>,

    /// Number of trailing samples to chart (overrides config file)
    #[arg(long, env = "PINGGRAPH_WINDOW")]
    window: Option<usize>,

    /// Use a synthetic prober instead of the system ping utility
    #[arg(long)]
    demo: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they never corrupt the alternate screen; silence
    // below warn unless RUST_LOG says otherwise.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration from file, then apply overrides (CLI > ENV > config file)
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            AppConfig::load(path)?
        }
        None => AppConfig::default(),
    };

    if let Some(target) = cli.target {
        config.target = target;
    }
    if let Some(interval) = cli.interval {
        config.interval = interval;
    }
    if let Some(window) = cli.window {
        config.window = window;
    }
    config.validate()?;

    let prober: Arc<dyn Prober> = if cli.demo {
        Arc::new(DemoProber::default())
    } else {
        Arc::new(PingProber::new(
            config.ping_command.as_str(),
            config.probe_timeout,
        ))
    };

    tracing::info!(
        target = %config.target,
        interval = ?config.interval,
        window = config.window,
        demo = cli.demo,
        "starting pinggraph"
    );

    App::new(config, prober).run().await
}
