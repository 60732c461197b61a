// src/core/webhook_client.rs
//! HTTP client for the resume generation webhook - one JSON POST per submission

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use tracing::{debug, error, info};

use crate::core::config_manager::WebhookConfig;
use crate::error::WebhookError;
use crate::types::{FormValues, WebhookResponse};

/// Anything able to deliver form values to the generation workflow.
#[async_trait]
pub trait WebhookTransport: Send + Sync {
    async fn send(&self, form: &FormValues) -> Result<WebhookResponse, WebhookError>;
}

pub struct WebhookClient {
    client: reqwest::Client,
    url: String,
}

impl WebhookClient {
    /// Create a client for the configured endpoint. Without a configured
    /// timeout the transport default applies.
    pub fn new(config: &WebhookConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }

}

#[async_trait]
impl WebhookTransport for WebhookClient {
    async fn send(&self, form: &FormValues) -> Result<WebhookResponse, WebhookError> {
        info!(url = %self.url, "Calling resume generation webhook");

        let response = self.client.post(&self.url).json(form).send().await?;

        let status = response.status();
        debug!("Webhook response status: {}", status);

        let is_text = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim_start().to_ascii_lowercase().starts_with("text/"))
            .unwrap_or(false);

        let body = response.text().await?;

        if !status.is_success() {
            error!("Webhook error response {}: {}", status, body);
            return Err(WebhookError::Status {
                status: status.as_u16(),
                body,
            });
        }

        debug!("Raw webhook response: {}", body);

        // Text bodies may still carry JSON; anything else in them is handed on as a bare string
        let payload = if is_text {
            serde_json::from_str(&body).unwrap_or(Value::String(body))
        } else {
            serde_json::from_str(&body)?
        };

        Ok(WebhookResponse(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ResponseNormalizer;
    use crate::types::form_values::sample_form;
    use axum::{
        extract::State,
        http::{header, StatusCode},
        response::IntoResponse,
        routing::post,
        Json, Router,
    };
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[derive(Clone, Default)]
    struct Captured {
        body: Arc<Mutex<Option<Value>>>,
    }

    async fn spawn_webhook(app: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/webhook")
    }

    fn client_for(url: String) -> WebhookClient {
        std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
        WebhookClient::new(&WebhookConfig { url, timeout: None }).expect("client")
    }

    #[tokio::test]
    async fn test_posts_form_as_json_and_returns_body_untouched() {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                "/webhook",
                post(|State(c): State<Captured>, Json(body): Json<Value>| async move {
                    *c.body.lock().unwrap() = Some(body);
                    Json(serde_json::json!([{"output": "<div>R</div>", "url": "https://x/y.pdf"}]))
                }),
            )
            .with_state(captured.clone());
        let client = client_for(spawn_webhook(app).await);

        let response = client.send(&sample_form()).await.expect("send");

        assert_eq!(
            response.0,
            serde_json::json!([{"output": "<div>R</div>", "url": "https://x/y.pdf"}])
        );
        let sent = captured.body.lock().unwrap().clone().expect("body captured");
        assert_eq!(sent["fullName"], "Ada Lovelace");
        assert_eq!(sent["experienceLevel"], "senior");
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let app = Router::new().route(
            "/webhook",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "workflow failed") }),
        );
        let client = client_for(spawn_webhook(app).await);

        match client.send(&sample_form()).await {
            Err(WebhookError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "workflow failed");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decode_error() {
        let app = Router::new().route(
            "/webhook",
            post(|| async {
                ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response()
            }),
        );
        let client = client_for(spawn_webhook(app).await);

        assert!(matches!(
            client.send(&sample_form()).await,
            Err(WebhookError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_text_body_becomes_bare_string() {
        let app = Router::new().route(
            "/webhook",
            post(|| async {
                ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], "<p>Plain</p>").into_response()
            }),
        );
        let client = client_for(spawn_webhook(app).await);

        let response = client.send(&sample_form()).await.expect("send");
        assert_eq!(response.0, Value::String("<p>Plain</p>".to_string()));
    }

    #[tokio::test]
    async fn test_text_body_holding_json_is_parsed() {
        let app = Router::new().route(
            "/webhook",
            post(|| async {
                (
                    [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                    r#"{"html":"<p>Resume</p>","pdfUrl":"https://x/y.pdf"}"#,
                )
                    .into_response()
            }),
        );
        let client = client_for(spawn_webhook(app).await);

        let response = client.send(&sample_form()).await.expect("send");
        let result = ResponseNormalizer::normalize(&response).expect("normalized");
        assert_eq!(result.html, "<p>Resume</p>");
        assert_eq!(result.pdf_url.as_deref(), Some("https://x/y.pdf"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("addr");
        drop(listener);
        let client = client_for(format!("http://{addr}/webhook"));

        assert!(matches!(
            client.send(&sample_form()).await,
            Err(WebhookError::Transport(_))
        ));
    }
}
