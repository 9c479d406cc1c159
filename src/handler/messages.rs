// handler/messages.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{chatdb::ChatExt, vendordb::VendorExt},
    dtos::chatdtos::SendMessageDto,
    error::HttpError,
    models::chatmodels::SenderType,
    AppState,
};

pub fn messages_handler() -> Router {
    Router::new()
        .route("/", post(send_message))
        .route("/:message_id", get(get_message_by_id))
        .route("/chat/:chat_id", get(get_messages_by_chat))
        .route("/chat/:chat_id/mark-seen/user/:user_id", put(mark_messages_seen))
        .route("/chat/:chat_id/unread-count/user/:user_id", get(get_unread_count))
        .route("/chat/:chat_id/unread/user/:user_id", get(get_unread_messages))
}

pub async fn send_message(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<SendMessageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let message = app_state
        .chat_service
        .send_message(&body)
        .await
        .map_err(HttpError::from)?;

    notify_recipient(&app_state, &body).await;

    Ok((StatusCode::CREATED, Json(message)))
}

// A vendor message lands as a notification in the user's inbox. Never
// fails the send.
async fn notify_recipient(app_state: &Arc<AppState>, body: &SendMessageDto) {
    if SenderType::from_str(&body.sender_type) != Some(SenderType::Vendor) {
        return;
    }

    let chat = match app_state.db_client.get_chat_by_id(body.chat_id).await {
        Ok(Some(chat)) => chat,
        _ => return,
    };

    let user_id = match chat.user_id {
        Some(user_id) => user_id,
        None => return,
    };

    let sender_name = match app_state.db_client.get_vendor(body.sender_id).await {
        Ok(Some(vendor)) => vendor.company_name,
        _ => "A vendor".to_string(),
    };

    if let Err(err) = app_state
        .notification_service
        .notify_message(user_id, &sender_name, chat.id)
        .await
    {
        tracing::warn!("Failed to create message notification: {err}");
    }
}

pub async fn get_messages_by_chat(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(chat_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .chat_service
        .messages_by_chat(chat_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(messages))
}

pub async fn get_message_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(message_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let message = app_state
        .chat_service
        .get_message(message_id)
        .await
        .map_err(HttpError::from)?
        .ok_or_else(|| HttpError::not_found("Message not found"))?;

    Ok(Json(message))
}

pub async fn mark_messages_seen(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((chat_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .chat_service
        .mark_messages_seen(chat_id, user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Messages marked as seen"
    })))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((chat_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .chat_service
        .unread_count(chat_id, user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "chatId": chat_id,
        "userId": user_id,
        "unreadCount": count
    })))
}

pub async fn get_unread_messages(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((chat_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let messages = app_state
        .chat_service
        .unread_messages(chat_id, user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(messages))
}
