// src/core/config_manager.rs
//! Layered configuration: defaults, config.yaml, environment variables, CLI flags

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Generation workflow the hosted form has always posted to.
pub const DEFAULT_WEBHOOK_URL: &str =
    "https://resumebuilder1.app.n8n.cloud/webhook/8c1d98d5-960e-455a-b060-9c917fe88050";
pub const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CONFIG_FILE: &str = "config.yaml";
const DEFAULT_OUTPUT_DIR: &str = "out";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub webhook: WebhookConfig,
    pub output_path: PathBuf,
    pub port: u16,
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WebhookConfig {
    pub url: String,
    /// `None` leaves the transport default in place
    pub timeout: Option<Duration>,
}

/// One environment section of config.yaml
#[derive(Debug, Clone, Default, Deserialize)]
struct FileSettings {
    webhook_url: Option<String>,
    request_timeout_secs: Option<u64>,
    output_path: Option<PathBuf>,
    port: Option<u16>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSettings,
    #[serde(default)]
    production: FileSettings,
}

impl ConfigManager {
    /// Load from the process environment and an optional config file.
    /// An explicit path must exist; the default `config.yaml` is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let yaml = match config_path {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            ),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Some(
                        std::fs::read_to_string(&default)
                            .context("Failed to read config.yaml")?,
                    )
                } else {
                    None
                }
            }
        };

        Self::from_sources(yaml.as_deref(), |key| std::env::var(key).ok())
    }

    /// Resolve configuration from raw sources. `env` looks up environment variables.
    pub fn from_sources<F>(yaml: Option<&str>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = env("RESUME_FORGE_ENV")
            .or_else(|| env("ENVIRONMENT"))
            .unwrap_or_else(|| "local".to_string());

        let file = match yaml {
            Some(content) => {
                let parsed: ConfigFile =
                    serde_yaml::from_str(content).context("Failed to parse config file")?;
                match environment.as_str() {
                    "production" => parsed.production,
                    _ => parsed.local,
                }
            }
            None => FileSettings::default(),
        };

        let url = env("RESUME_WEBHOOK_URL")
            .or(file.webhook_url)
            .unwrap_or_else(|| DEFAULT_WEBHOOK_URL.to_string());

        let timeout_secs = match env("RESUME_WEBHOOK_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .context("RESUME_WEBHOOK_TIMEOUT_SECS must be a number of seconds")?,
            ),
            None => file.request_timeout_secs,
        };

        let port = match env("RESUME_FORGE_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("RESUME_FORGE_PORT must be a valid port number")?,
            None => file.port.unwrap_or(DEFAULT_PORT),
        };

        let output_path = env("RESUME_OUTPUT_DIR")
            .map(PathBuf::from)
            .or(file.output_path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let log_file = env("RESUME_FORGE_LOG_FILE")
            .map(PathBuf::from)
            .or(file.log_file);

        let mut config = Self {
            environment,
            webhook: WebhookConfig {
                url: String::new(),
                timeout: timeout_secs.map(Duration::from_secs),
            },
            output_path: resolve_path(&output_path)?,
            port,
            log_file: log_file.map(|p| resolve_path(&p)).transpose()?,
        };
        config.set_webhook_url(url)?;

        Ok(config)
    }

    /// Override the webhook endpoint, e.g. from a CLI flag
    pub fn set_webhook_url(&mut self, url: String) -> Result<()> {
        validate_webhook_url(&url)?;
        self.webhook.url = url;
        Ok(())
    }

    pub fn with_output_path(mut self, path: PathBuf) -> Result<Self> {
        self.output_path = resolve_path(&path)?;
        Ok(self)
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

fn validate_webhook_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .with_context(|| format!("Invalid webhook URL: {}", url))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("Webhook URL must use http or https, got {}", other),
    }
}

fn resolve_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let current_dir = std::env::current_dir().context("Failed to get current directory")?;
        Ok(current_dir.join(path))
    }
}
