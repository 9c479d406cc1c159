// handler/chat.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dtos::chatdtos::CreateChatDto,
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn chat_handler() -> Router {
    Router::new()
        .route("/", post(create_or_get_chat))
        .route("/:chat_id", get(get_chat_by_id))
        .route("/vendor/:vendor_id", get(get_chats_by_vendor))
        .route("/vendor/:vendor_id/user/:user_id", get(get_chat_by_vendor_and_user))
        .route("/vendor/:vendor_id/vendor/:vendor2_id", get(get_chat_by_vendors))
        .route("/user/:user_id", get(get_chats_by_user))
        .route("/support/user/:user_id", get(get_support_chat_for_user))
        .route("/support/vendor/:vendor_id", get(get_support_chat_for_vendor))
}

pub async fn create_or_get_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateChatDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let chat = app_state
        .chat_service
        .create_or_get_chat(&body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(chat))
}

pub async fn get_chat_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .chat_service
        .get_chat(chat_id)
        .await
        .map_err(HttpError::from)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::ChatNotFound.to_string()))?;

    Ok(Json(chat))
}

pub async fn get_chat_by_vendor_and_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((vendor_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .chat_service
        .get_chat_by_vendor_and_user(vendor_id, user_id)
        .await
        .map_err(HttpError::from)?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::ChatNotFound.to_string()))?;

    Ok(Json(chat))
}

// Create-or-get for a vendor pair
pub async fn get_chat_by_vendors(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((vendor_id, vendor2_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let dto = CreateChatDto {
        vendor_id: Some(vendor_id),
        user_id: None,
        vendor2_id: Some(vendor2_id),
    };

    let chat = app_state
        .chat_service
        .create_or_get_chat(&dto)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(chat))
}

pub async fn get_chats_by_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chats = app_state
        .chat_service
        .chats_by_vendor(vendor_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(chats))
}

pub async fn get_chats_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chats = app_state
        .chat_service
        .chats_by_user(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(chats))
}

pub async fn get_support_chat_for_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .chat_service
        .get_or_create_support_chat_for_user(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(chat))
}

pub async fn get_support_chat_for_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let chat = app_state
        .chat_service
        .get_or_create_support_chat_for_vendor(vendor_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(chat))
}
