// src/types/form_values.rs
//! Resume form data sent to the generation webhook

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::FormError;
use crate::utils::get_file_extension;

// ===== Enumerated Fields =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    Mid,
    Senior,
    Executive,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResumeTemplate {
    #[default]
    Modern,
    Classic,
    Minimal,
}

// ===== Form Values =====

/// Everything the user typed into the resume form. Serialized in camelCase,
/// the shape the generation workflow expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormValues {
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub target_role: String,
    pub experience_level: ExperienceLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub experience: String,
    pub education: String,
    pub skills: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certifications: Option<String>,
    #[serde(default)]
    pub template: ResumeTemplate,
}

impl FormValues {
    /// Presence checks on required fields
    pub fn validate(&self) -> Result<(), FormError> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("targetRole", &self.target_role),
            ("experience", &self.experience),
            ("education", &self.education),
            ("skills", &self.skills),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(FormError::MissingField(name));
            }
        }

        let email = self.email.trim();
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
            _ => Err(FormError::InvalidEmail(email.to_string())),
        }
    }

    /// Load form values from a `.json`, `.yaml`/`.yml` or `.toml` file
    pub fn from_file(path: &Path) -> Result<Self> {
        let file_name = path.to_string_lossy();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file: {}", path.display()))?;

        match get_file_extension(&file_name).as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON form: {}", path.display())),
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML form: {}", path.display())),
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML form: {}", path.display())),
            _ => anyhow::bail!(
                "Unsupported form format: {}. Use .json, .yaml or .toml",
                path.display()
            ),
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_form() -> FormValues {
    FormValues {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: None,
        location: Some("London".to_string()),
        linkedin: None,
        target_role: "Analytical Engine Programmer".to_string(),
        experience_level: ExperienceLevel::Senior,
        summary: None,
        experience: "Wrote the first published algorithm".to_string(),
        education: "Private tutoring in mathematics".to_string(),
        skills: "Mathematics, Poetry".to_string(),
        certifications: None,
        template: ResumeTemplate::Classic,
    }
}
