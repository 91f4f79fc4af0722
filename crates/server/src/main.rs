mod bootstrap;
mod health;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use griddle_agent::runner::{NoopCallTransport, SessionRunner};
use griddle_agent::sink::TranscriptSink;
use griddle_core::config::{AppConfig, ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "griddle-server",
    about = "Griddle voice ordering agent server",
    long_about = "Runs one ordering session: loads the menu from the order backend, exposes \
                  the order tools to the conversation pipeline, and submits confirmed orders."
)]
struct Args {
    #[arg(long, help = "Path to a griddle.toml config file")]
    config: Option<std::path::PathBuf>,
    #[arg(long, help = "Override the configured log level")]
    log_level: Option<String>,
    #[arg(long, help = "Override the order backend base URL")]
    backend_url: Option<String>,
}

fn init_logging(config: &AppConfig) {
    use griddle_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    run().await
}

async fn run() -> Result<()> {
    let args = Args::parse();
    let options = LoadOptions {
        config_path: args.config.clone(),
        require_file: args.config.is_some(),
        overrides: ConfigOverrides {
            backend_base_url: args.backend_url,
            log_level: args.log_level,
        },
    };

    // Load config and initialize logging before any other operations
    let config = AppConfig::load(options)?;
    init_logging(&config);

    let app = bootstrap::bootstrap_with_config(config).await?;

    health::spawn(
        &app.config.server.bind_address,
        app.config.server.health_check_port,
        app.catalog.len(),
    )
    .await?;

    tracing::debug!(
        tool_count = app.registry.len(),
        prompt_chars = app.system_prompt.len(),
        "agent surface prepared for the conversation pipeline"
    );

    // The conversation pipeline plugs in as a CallTransport; the noop
    // transport keeps the session wiring exercised until one is attached.
    let runner = SessionRunner::new(
        Arc::new(NoopCallTransport),
        app.registry,
        Arc::new(TranscriptSink::default()),
    );
    runner.run().await?;

    tracing::info!(event_name = "system.server.started", "griddle-server started");
    wait_for_shutdown().await?;
    tracing::info!(event_name = "system.server.stopping", "griddle-server stopping");

    Ok(())
}

async fn wait_for_shutdown() -> Result<()> {
    tokio::signal::ctrl_c().await?;
    Ok(())
}
