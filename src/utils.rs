// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Normalize a person's name for file system usage
pub fn normalize_profile_name(name: &str) -> String {
    let slug: String = name
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if slug.is_empty() {
        "resume".to_string()
    } else {
        slug
    }
}

/// Build output file path for a generated resume
pub fn output_file_path(base: &Path, profile: &str, extension: &str) -> PathBuf {
    base.join(format!(
        "{}_{}.{}",
        normalize_profile_name(profile),
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    ))
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Write file content, creating parent directories as needed
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

/// Get file extension in lowercase
pub fn get_file_extension(filename: &str) -> Option<String> {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
}
