// handler/chatbot.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::chatbotdb::ChatbotExt, dtos::chatbotdtos::CreateConversationDto, error::HttpError,
    AppState,
};

pub fn chatbot_handler() -> Router {
    Router::new()
        .route("/", get(get_all_conversations).post(create_conversation))
        .route("/:conversation_id", get(get_conversation_by_id).delete(delete_conversation))
}

pub async fn get_all_conversations(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let conversations = app_state
        .db_client
        .get_conversations()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(conversations))
}

pub async fn get_conversation_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let conversation = app_state
        .db_client
        .get_conversation(conversation_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Conversation not found"))?;

    Ok(Json(conversation))
}

pub async fn create_conversation(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateConversationDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let conversation = app_state
        .db_client
        .save_conversation(body.user_id, body.event_id, body.message, body.response)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": conversation
    })))
}

pub async fn delete_conversation(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(conversation_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_conversation(conversation_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found("Conversation not found"));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Conversation deleted"
    })))
}
