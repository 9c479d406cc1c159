// handler/notification_handler.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{delete, get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{error::HttpError, models::notificationmodel::NotificationType, AppState};

pub fn notification_handler() -> Router {
    Router::new()
        .route("/user/:user_id", get(get_notifications_by_user))
        .route("/user/:user_id/unread-count", get(get_unread_count))
        .route("/user/:user_id/read-all", put(mark_all_as_read))
        .route("/user/:user_id/type/:notification_type", get(get_notifications_by_type))
        .route("/:notification_id/read", put(mark_as_read))
        .route("/:notification_id", delete(delete_notification))
}

pub async fn get_notifications_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notifications = app_state
        .notification_service
        .notifications_by_user(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(notifications))
}

pub async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .notification_service
        .unread_count(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "userId": user_id,
        "unreadCount": count
    })))
}

pub async fn mark_as_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let notification = app_state
        .notification_service
        .mark_as_read(notification_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": notification
    })))
}

pub async fn mark_all_as_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .notification_service
        .mark_all_as_read(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "updated": updated
    })))
}

pub async fn delete_notification(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .notification_service
        .delete_notification(notification_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Notification deleted"
    })))
}

pub async fn get_notifications_by_type(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((user_id, notification_type)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, HttpError> {
    let notification_type = NotificationType::from_str(&notification_type)
        .ok_or_else(|| HttpError::bad_request("Invalid notification type"))?;

    let notifications = app_state
        .notification_service
        .notifications_by_type(user_id, notification_type)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(notifications))
}
