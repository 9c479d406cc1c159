// handler/gemini.rs
use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{dtos::chatbotdtos::GenerateRequestDto, error::HttpError, AppState};

pub fn gemini_handler() -> Router {
    Router::new().route("/generate", post(generate))
}

pub async fn generate(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<GenerateRequestDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let response = app_state
        .gemini_service
        .generate(&body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(response))
}
