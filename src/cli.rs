// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::error;

use crate::controller::ResumeSession;
use crate::core::{ConfigManager, ResponseNormalizer, WebhookClient};
use crate::render::write_resume_html;
use crate::types::{FormValues, NormalizedResult, WebhookResponse};
use crate::web::start_web_server;

#[derive(Parser)]
#[command(name = "resume-forge")]
#[command(about = "Generate resumes through a remote automation webhook")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the generation webhook URL
    #[arg(long, global = true)]
    pub webhook_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Submit a form file and save the generated resume
    Generate {
        /// Form values as .json, .yaml or .toml
        form: PathBuf,
        #[arg(long)]
        output_dir: Option<PathBuf>,
        /// Print the HTML instead of writing a file
        #[arg(long)]
        stdout: bool,
    },
    /// Run the response parser on a saved webhook payload
    Normalize { payload: PathBuf },
    /// Start the local web front end
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    /// Resolve configuration, applying command-line overrides last
    pub fn load_config(&self) -> Result<ConfigManager> {
        let mut config = ConfigManager::load(self.config.as_deref())?;
        if let Some(url) = &self.webhook_url {
            config.set_webhook_url(url.clone())?;
        }
        match &self.command {
            Command::Generate {
                output_dir: Some(dir),
                ..
            } => config = config.with_output_path(dir.clone())?,
            Command::Serve { port: Some(port) } => config = config.with_port(*port),
            _ => {}
        }
        Ok(config)
    }
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Generate { form, stdout, .. } => generate(&config, form, stdout).await,
        Command::Normalize { payload } => normalize(payload),
        Command::Serve { .. } => start_web_server(&config).await,
    }
}

async fn generate(config: &ConfigManager, form_path: PathBuf, stdout: bool) -> Result<()> {
    let form = FormValues::from_file(&form_path)?;
    let full_name = form.full_name.clone();

    let client = WebhookClient::new(&config.webhook)?;
    let session = ResumeSession::new(Arc::new(client));
    session.start()?;

    let result = match session.submit(form).await {
        Ok(result) => result,
        Err(e) => {
            error!("Resume generation failed: {}", e);
            anyhow::bail!(e.user_message());
        }
    };

    let saved_to = if stdout {
        None
    } else {
        Some(write_resume_html(&config.output_path, &full_name, &result).await?)
    };

    report_result(
        &result,
        saved_to.as_deref(),
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    )?;

    Ok(())
}

/// Print the outcome of a generation. Without a saved file the HTML itself goes
/// to `out` and everything else to `notes`, so the HTML can be piped.
fn report_result(
    result: &NormalizedResult,
    saved_to: Option<&Path>,
    out: &mut impl Write,
    notes: &mut impl Write,
) -> std::io::Result<()> {
    let notes: &mut dyn Write = match saved_to {
        Some(path) => {
            writeln!(out, "✓ Resume saved to {}", path.display())?;
            out
        }
        None => {
            writeln!(out, "{}", result.html)?;
            notes
        }
    };

    match &result.pdf_url {
        Some(url) => writeln!(notes, "  PDF: {}", url),
        None => writeln!(notes, "  No PDF link was returned"),
    }
}

fn normalize(payload_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&payload_path)
        .with_context(|| format!("Failed to read payload: {}", payload_path.display()))?;
    let raw: WebhookResponse = serde_json::from_str(&content)
        .with_context(|| format!("Payload is not JSON: {}", payload_path.display()))?;

    match ResponseNormalizer::normalize(&raw) {
        Some(result) => {
            let source = ResponseNormalizer::html_source(&raw).unwrap_or("unknown");
            eprintln!("HTML taken from: {}", source);
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
        None => anyhow::bail!("No resume HTML found in {}", payload_path.display()),
    }
}
