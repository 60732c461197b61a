use anyhow::{Context, Result};
use clap::Parser;
use resume_forge::cli::{handle_command, Cli};
use resume_forge::core::ConfigManager;
use std::fs::OpenOptions;
use tracing::info;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

fn init_logging(config: &ConfigManager) -> Result<()> {
    let file_layer = match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("resume_forge=info,rocket=warn")),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;

    init_logging(&config)?;

    info!("Environment: {}", config.environment);
    info!("Webhook: {}", config.webhook.url);

    handle_command(cli, config).await
}
