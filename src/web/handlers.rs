// src/web/handlers.rs
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{info, warn};

use crate::controller::{ResumeSession, UiState};
use crate::render::{landing_page, result_page};
use crate::types::{FormValues, NormalizedResult};
use crate::web::types::*;

/// The form page, unless a generated resume is still being held
pub async fn index_handler(session: &State<ResumeSession>) -> Result<RawHtml<String>, Redirect> {
    match session.state() {
        UiState::Success(_) => Err(Redirect::to("/resume")),
        _ => Ok(RawHtml(landing_page())),
    }
}

pub async fn resume_page_handler(session: &State<ResumeSession>) -> Result<RawHtml<String>, Redirect> {
    match session.state() {
        UiState::Success(result) => Ok(RawHtml(result_page(&result))),
        _ => Err(Redirect::to("/")),
    }
}

pub async fn start_handler(session: &State<ResumeSession>) -> Result<Json<StateView>, ApiError> {
    session.start().map_err(api_error)?;
    Ok(Json(state_view(session)))
}

pub async fn submit_handler(
    form: Json<FormValues>,
    session: &State<ResumeSession>,
) -> Result<Json<DataResponse<NormalizedResult>>, ApiError> {
    match session.submit(form.into_inner()).await {
        Ok(result) => Ok(Json(DataResponse::new("Resume generated", result))),
        Err(e) => {
            warn!("Resume submission rejected: {}", e);
            Err(api_error(e))
        }
    }
}

pub async fn reset_handler(session: &State<ResumeSession>) -> Result<Json<StateView>, ApiError> {
    session.reset().map_err(api_error)?;
    info!("Session reset");
    Ok(Json(state_view(session)))
}

pub async fn state_handler(session: &State<ResumeSession>) -> Json<StateView> {
    Json(state_view(session))
}

pub async fn health_handler() -> Json<TextResponse> {
    Json(TextResponse::ok("ok"))
}

fn state_view(session: &ResumeSession) -> StateView {
    StateView::new(&session.state())
}
