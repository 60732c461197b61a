// src/controller.rs
//! Submission state machine: idle, form visible, submitting, success or failure.
//!
//! The state tag is the only guard against overlapping submissions. The session
//! mutex is held for synchronous transitions only, never across the webhook call.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::core::{ResponseNormalizer, WebhookTransport};
use crate::error::{SubmitError, WebhookError, FAILURE_NOTICE};
use crate::types::{FormValues, NormalizedResult, WebhookResponse};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum UiState {
    #[default]
    Idle,
    FormVisible,
    Submitting { submission_id: Uuid },
    Success(NormalizedResult),
    Failed,
}

impl UiState {
    pub fn name(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::FormVisible => "form_visible",
            UiState::Submitting { .. } => "submitting",
            UiState::Success(_) => "success",
            UiState::Failed => "failed",
        }
    }
}

#[derive(Debug, Default)]
pub struct AppController {
    state: UiState,
}

impl AppController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn result(&self) -> Option<&NormalizedResult> {
        match &self.state {
            UiState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// User-facing notice for the current state, if any
    pub fn notice(&self) -> Option<&'static str> {
        match self.state {
            UiState::Failed => Some(FAILURE_NOTICE),
            _ => None,
        }
    }

    /// Reveal the form
    pub fn start(&mut self) -> Result<(), SubmitError> {
        match self.state {
            UiState::Idle => {
                self.state = UiState::FormVisible;
                Ok(())
            }
            // Already showing the form
            UiState::FormVisible | UiState::Failed => Ok(()),
            UiState::Submitting { .. } => Err(SubmitError::Busy),
            UiState::Success(_) => Err(self.invalid("start")),
        }
    }

    /// Move into `Submitting`, clearing any previous result. Invalid form values
    /// are rejected without touching the state.
    pub fn begin_submit(&mut self, form: &FormValues) -> Result<Uuid, SubmitError> {
        match self.state {
            UiState::FormVisible | UiState::Failed => {}
            UiState::Submitting { .. } => return Err(SubmitError::Busy),
            UiState::Idle | UiState::Success(_) => return Err(self.invalid("submit")),
        }

        form.validate()?;

        let submission_id = Uuid::new_v4();
        info!(%submission_id, template = ?form.template, "Resume submission started");
        self.state = UiState::Submitting { submission_id };
        Ok(submission_id)
    }

    /// Settle the in-flight submission with the webhook outcome
    pub fn finish(
        &mut self,
        submission_id: Uuid,
        outcome: Result<WebhookResponse, WebhookError>,
    ) -> Result<NormalizedResult, SubmitError> {
        match self.state {
            UiState::Submitting { submission_id: current } if current == submission_id => {}
            _ => return Err(self.invalid("finish")),
        }

        let response = match outcome {
            Ok(response) => response,
            Err(e) => {
                error!(%submission_id, "Error generating resume: {}", e);
                self.state = UiState::Failed;
                return Err(SubmitError::Network(e));
            }
        };

        match ResponseNormalizer::normalize(&response) {
            Some(result) => {
                info!(
                    %submission_id,
                    html_bytes = result.html.len(),
                    has_pdf = result.pdf_url.is_some(),
                    "Resume generated"
                );
                self.state = UiState::Success(result.clone());
                Ok(result)
            }
            None => {
                warn!(%submission_id, "No HTML content found in webhook response");
                self.state = UiState::Failed;
                Err(SubmitError::NoHtml)
            }
        }
    }

    /// Drop any result and go back to the start. Not available mid-submission.
    pub fn reset(&mut self) -> Result<(), SubmitError> {
        if let UiState::Submitting { .. } = self.state {
            return Err(SubmitError::Busy);
        }
        self.state = UiState::Idle;
        Ok(())
    }

    fn invalid(&self, action: &'static str) -> SubmitError {
        SubmitError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

/// One user session: the controller plus the transport it submits through.
pub struct ResumeSession {
    controller: Mutex<AppController>,
    transport: Arc<dyn WebhookTransport>,
}

impl ResumeSession {
    pub fn new(transport: Arc<dyn WebhookTransport>) -> Self {
        Self {
            controller: Mutex::new(AppController::new()),
            transport,
        }
    }

    fn controller(&self) -> MutexGuard<'_, AppController> {
        self.controller.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> UiState {
        self.controller().state().clone()
    }

    pub fn notice(&self) -> Option<&'static str> {
        self.controller().notice()
    }

    pub fn start(&self) -> Result<(), SubmitError> {
        self.controller().start()
    }

    pub fn reset(&self) -> Result<(), SubmitError> {
        self.controller().reset()
    }

    /// Full cycle for one submission. A second call while this one is awaiting
    /// the webhook fails fast with `SubmitError::Busy`.
    pub async fn submit(&self, form: FormValues) -> Result<NormalizedResult, SubmitError> {
        let submission_id = self.controller().begin_submit(&form)?;
        let outcome = self.transport.send(&form).await;
        drop(form);
        self.controller().finish(submission_id, outcome)
    }
}
