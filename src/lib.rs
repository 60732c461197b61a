//! Resume generation front end for a remote automation webhook.
//!
//! Form values go out in one JSON POST; whatever comes back is searched for
//! resume HTML and an optional PDF link.

pub mod cli;
pub mod controller;
pub mod core;
pub mod error;
pub mod render;
pub mod types;
pub mod utils;
pub mod web;

pub use controller::{AppController, ResumeSession, UiState};
pub use error::{FormError, SubmitError, WebhookError, FAILURE_NOTICE};
pub use types::{FormValues, NormalizedResult, WebhookResponse};
