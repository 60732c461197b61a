// src/types/response.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw payload returned by the generation webhook. No schema is guaranteed:
/// it may be an object, an array whose first element matters, or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WebhookResponse(pub Value);

/// Resume extracted from a webhook payload. `html` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    pub html: String,
    pub pdf_url: Option<String>,
}
