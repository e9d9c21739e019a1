//! Pulse monitor entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Live dashboard monitor for the trading-analytics backend
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PULSE_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    pulse_telemetry::init_logging()?;

    info!("Starting pulse-monitor v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > PULSE_CONFIG env var > default
    let config = match args.config {
        Some(path) => pulse_monitor::AppConfig::from_file(&path)?,
        None => pulse_monitor::AppConfig::load()?,
    };
    info!(base_url = %config.base_url, "Configuration loaded");

    let app = pulse_monitor::Application::new(config)?;
    app.run().await?;

    Ok(())
}
