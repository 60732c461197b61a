// src/web/mod.rs
//! Local web front end: form page, result page and a small JSON API over one session

pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::figment::Figment;
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::info;

use crate::controller::ResumeSession;
use crate::core::{ConfigManager, WebhookClient};
use crate::types::{FormValues, NormalizedResult};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/")]
pub async fn index(session: &State<ResumeSession>) -> Result<RawHtml<String>, Redirect> {
    handlers::index_handler(session).await
}

#[get("/resume")]
pub async fn resume_page(session: &State<ResumeSession>) -> Result<RawHtml<String>, Redirect> {
    handlers::resume_page_handler(session).await
}

#[post("/start")]
pub async fn start(session: &State<ResumeSession>) -> Result<Json<StateView>, ApiError> {
    handlers::start_handler(session).await
}

#[post("/submit", data = "<form>")]
pub async fn submit(
    form: Json<FormValues>,
    session: &State<ResumeSession>,
) -> Result<Json<DataResponse<NormalizedResult>>, ApiError> {
    handlers::submit_handler(form, session).await
}

#[post("/reset")]
pub async fn reset(session: &State<ResumeSession>) -> Result<Json<StateView>, ApiError> {
    handlers::reset_handler(session).await
}

#[get("/state")]
pub async fn state(session: &State<ResumeSession>) -> Json<StateView> {
    handlers::state_handler(session).await
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec!["Check your request JSON format".to_string()],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Not found".to_string(),
        "NOT_FOUND".to_string(),
        vec![],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Form values could not be read".to_string(),
        "UNPROCESSABLE_ENTITY".to_string(),
        vec![
            "Verify all required fields are present".to_string(),
            "Check experienceLevel and template values".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

/// Assemble the application around an existing session
pub fn build_rocket(session: ResumeSession, figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(Cors)
        .manage(session)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount("/", routes![index, resume_page])
        .mount("/api", routes![start, submit, reset, state, health, options])
}

// Main server start function
pub async fn start_web_server(config: &ConfigManager) -> Result<()> {
    let client = WebhookClient::new(&config.webhook)?;
    let session = ResumeSession::new(Arc::new(client));

    let figment = rocket::Config::figment().merge(("port", config.port));

    info!("Starting resume web front end on port {}", config.port);
    info!("Webhook: {}", config.webhook.url);

    build_rocket(session, figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::WebhookTransport;
    use crate::error::{WebhookError, FAILURE_NOTICE};
    use crate::types::form_values::sample_form;
    use crate::types::WebhookResponse;
    use rocket::http::ContentType;
    use rocket::local::asynchronous::Client;
    use serde_json::{json, Value};

    struct StaticTransport(Option<Value>);

    #[rocket::async_trait]
    impl WebhookTransport for StaticTransport {
        async fn send(&self, _form: &FormValues) -> Result<WebhookResponse, WebhookError> {
            match &self.0 {
                Some(value) => Ok(WebhookResponse(value.clone())),
                None => Err(WebhookError::Status {
                    status: 500,
                    body: "internal stack trace".to_string(),
                }),
            }
        }
    }

    async fn client(reply: Option<Value>) -> Client {
        let session = ResumeSession::new(Arc::new(StaticTransport(reply)));
        Client::tracked(build_rocket(session, rocket::Config::figment()))
            .await
            .expect("valid rocket instance")
    }

    #[rocket::async_test]
    async fn test_full_cycle_through_api() {
        let client = client(Some(json!({"html": "<p>Resume</p>", "pdfUrl": "https://x/y.pdf"}))).await;

        let response = client.post("/api/start").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let response = client
            .post("/api/submit")
            .json(&sample_form())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.expect("json body");
        assert_eq!(body["data"]["html"], "<p>Resume</p>");
        assert_eq!(body["data"]["pdfUrl"], "https://x/y.pdf");

        let snapshot: Value = client
            .get("/api/state")
            .dispatch()
            .await
            .into_json()
            .await
            .expect("json body");
        assert_eq!(snapshot["state"], "success");

        let page = client.get("/resume").dispatch().await;
        assert_eq!(page.status(), Status::Ok);
        let html = page.into_string().await.expect("page");
        assert!(html.contains("&lt;p&gt;Resume"));
        assert!(html.contains("y.pdf"));

        let response = client.post("/api/reset").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let page = client.get("/resume").dispatch().await;
        assert_eq!(page.status(), Status::SeeOther);
    }

    #[rocket::async_test]
    async fn test_landing_page_redirects_while_result_is_held() {
        let client = client(Some(json!({"html": "<p>Resume</p>"}))).await;
        client.post("/api/start").dispatch().await;
        let response = client
            .post("/api/submit")
            .json(&sample_form())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);

        let page = client.get("/").dispatch().await;
        assert_eq!(page.status(), Status::SeeOther);
        assert_eq!(page.headers().get_one("Location"), Some("/resume"));

        client.post("/api/reset").dispatch().await;
        let page = client.get("/").dispatch().await;
        assert_eq!(page.status(), Status::Ok);
    }

    #[rocket::async_test]
    async fn test_webhook_failure_returns_generic_notice() {
        let client = client(None).await;
        client.post("/api/start").dispatch().await;

        let response = client
            .post("/api/submit")
            .json(&sample_form())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::BadGateway);
        let body: Value = response.into_json().await.expect("json body");
        assert_eq!(body["error"], FAILURE_NOTICE);
        assert_eq!(body["error_code"], "GENERATION_FAILED");
        assert!(!body.to_string().contains("stack trace"));

        let snapshot: Value = client
            .get("/api/state")
            .dispatch()
            .await
            .into_json()
            .await
            .expect("json body");
        assert_eq!(snapshot["state"], "failed");
        assert_eq!(snapshot["notice"], FAILURE_NOTICE);
    }

    #[rocket::async_test]
    async fn test_submit_before_start_conflicts() {
        let client = client(Some(json!("<p>Plain</p>"))).await;
        let response = client
            .post("/api/submit")
            .json(&sample_form())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Conflict);
    }

    #[rocket::async_test]
    async fn test_invalid_form_is_unprocessable() {
        let client = client(Some(json!("<p>Plain</p>"))).await;
        client.post("/api/start").dispatch().await;

        let mut form = sample_form();
        form.email = "nobody".to_string();
        let response = client
            .post("/api/submit")
            .json(&form)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);

        let response = client
            .post("/api/submit")
            .header(ContentType::JSON)
            .body(r#"{"fullName": "Ada"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);
    }

    #[rocket::async_test]
    async fn test_landing_page_and_health() {
        let client = client(None).await;
        let page = client.get("/").dispatch().await;
        assert_eq!(page.status(), Status::Ok);
        assert_eq!(page.content_type(), Some(ContentType::HTML));

        let health = client.get("/api/health").dispatch().await;
        assert_eq!(health.status(), Status::Ok);
    }
}
