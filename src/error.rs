// src/error.rs
//! Error taxonomy for form validation, the webhook call and the submission cycle

use thiserror::Error;

/// Generic notice shown for any failed generation. Subtypes are never surfaced.
pub const FAILURE_NOTICE: &str =
    "Something went wrong while generating your resume. Please try again.";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid email address `{0}`")]
    InvalidEmail(String),
}

/// Failure of the single outbound webhook call.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("webhook returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("webhook returned malformed JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    Busy,

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    #[error("invalid form: {0}")]
    InvalidForm(#[from] FormError),

    #[error(transparent)]
    Network(#[from] WebhookError),

    #[error("webhook response contained no resume HTML")]
    NoHtml,
}

impl SubmitError {
    /// Stable code for API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            SubmitError::Busy => "SUBMISSION_IN_FLIGHT",
            SubmitError::InvalidTransition { .. } => "INVALID_TRANSITION",
            SubmitError::InvalidForm(_) => "INVALID_FORM",
            SubmitError::Network(_) | SubmitError::NoHtml => "GENERATION_FAILED",
        }
    }

    /// Text safe to show the user. Generation failures collapse into one notice.
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Network(_) | SubmitError::NoHtml => FAILURE_NOTICE.to_string(),
            other => other.to_string(),
        }
    }

    /// Whether this error moved the session into the failed state.
    pub fn is_generation_failure(&self) -> bool {
        matches!(self, SubmitError::Network(_) | SubmitError::NoHtml)
    }
}
