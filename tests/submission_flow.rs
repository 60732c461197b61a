use axum::{http::StatusCode, routing::post, Json, Router};
use resume_forge::core::{WebhookClient, WebhookConfig};
use resume_forge::render::write_resume_html;
use resume_forge::{FormValues, ResumeSession, SubmitError, UiState, FAILURE_NOTICE};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::net::TcpListener;

fn form() -> FormValues {
    serde_json::from_value(json!({
        "fullName": "Grace Hopper",
        "email": "grace@example.com",
        "targetRole": "Compiler Engineer",
        "experienceLevel": "executive",
        "experience": "Led the COBOL effort",
        "education": "PhD, Yale",
        "skills": "Compilers, Debugging",
        "template": "minimal"
    }))
    .expect("valid form")
}

async fn spawn_webhook(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/webhook")
}

fn session_for(url: String) -> ResumeSession {
    let client = WebhookClient::new(&WebhookConfig { url, timeout: None }).expect("client");
    let session = ResumeSession::new(Arc::new(client));
    session.start().expect("start");
    session
}

#[tokio::test]
async fn generated_resume_is_written_and_pdf_link_kept() {
    let app = Router::new().route(
        "/webhook",
        post(|Json(body): Json<Value>| async move {
            let name = body["fullName"].as_str().unwrap_or_default().to_string();
            Json(json!([{
                "output": format!("<h1>{name}</h1>"),
                "url": "https://files.example.com/resume.pdf"
            }]))
        }),
    );
    let session = session_for(spawn_webhook(app).await);

    let result = session.submit(form()).await.expect("generated");
    assert_eq!(result.html, "<h1>Grace Hopper</h1>");
    assert_eq!(
        result.pdf_url.as_deref(),
        Some("https://files.example.com/resume.pdf")
    );

    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_resume_html(dir.path(), "Grace Hopper", &result)
        .await
        .expect("written");
    assert!(path
        .file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with("grace_hopper_")));
    assert_eq!(
        std::fs::read_to_string(path).expect("read back"),
        "<h1>Grace Hopper</h1>"
    );
}

#[tokio::test]
async fn server_error_fails_then_resubmission_succeeds() {
    let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let app = Router::new().route(
        "/webhook",
        post({
            let calls = calls.clone();
            move || {
                let calls = calls.clone();
                async move {
                    if calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
                        Err((StatusCode::BAD_GATEWAY, "upstream model timed out"))
                    } else {
                        Ok(Json(json!({"html": "<p>Second try</p>"})))
                    }
                }
            }
        }),
    );
    let session = session_for(spawn_webhook(app).await);

    let err = session.submit(form()).await.unwrap_err();
    assert!(matches!(err, SubmitError::Network(_)));
    assert_eq!(err.user_message(), FAILURE_NOTICE);
    assert_eq!(session.state(), UiState::Failed);

    let result = session.submit(form()).await.expect("second attempt");
    assert_eq!(result.html, "<p>Second try</p>");
    assert_eq!(result.pdf_url, None);
    assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 2);
}
