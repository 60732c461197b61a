// src/web/types.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::serde::Serialize;

use crate::controller::UiState;
use crate::error::{SubmitError, FAILURE_NOTICE};
use crate::types::NormalizedResult;

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

/// Snapshot of the session for the page script
#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StateView {
    pub state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<NormalizedResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<&'static str>,
}

pub type ApiError = (Status, Json<StandardErrorResponse>);

impl TextResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message: message.into(),
        }
    }
}

impl<T> DataResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message: message.into(),
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

impl StateView {
    pub fn new(state: &UiState) -> Self {
        let (result, notice) = match state {
            UiState::Success(result) => (Some(result.clone()), None),
            UiState::Failed => (None, Some(FAILURE_NOTICE)),
            _ => (None, None),
        };
        Self {
            state: state.name(),
            result,
            notice,
        }
    }
}

impl From<SubmitError> for StandardErrorResponse {
    fn from(err: SubmitError) -> Self {
        let suggestions = match &err {
            SubmitError::Busy => vec!["Wait for the current resume to finish".to_string()],
            SubmitError::InvalidTransition { .. } => {
                vec!["Reset the session and start again".to_string()]
            }
            SubmitError::InvalidForm(_) => vec!["Fill in all required fields".to_string()],
            SubmitError::Network(_) | SubmitError::NoHtml => {
                vec!["Try again in a few moments".to_string()]
            }
        };
        Self::new(err.user_message(), err.code().to_string(), suggestions)
    }
}

/// Map a controller error onto an HTTP status and JSON body
pub fn api_error(err: SubmitError) -> ApiError {
    let status = match &err {
        SubmitError::Busy | SubmitError::InvalidTransition { .. } => Status::Conflict,
        SubmitError::InvalidForm(_) => Status::UnprocessableEntity,
        SubmitError::Network(_) | SubmitError::NoHtml => Status::BadGateway,
    };
    (status, Json(err.into()))
}
