// handler/events.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{eventdb::EventExt, userdb::UserExt},
    dtos::eventdtos::{CreateEventDto, DateRangeQueryDto, UpdateEventDateDto},
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn events_handler() -> Router {
    Router::new()
        .route("/", get(get_all_events).post(create_event))
        .route("/user/:user_id", get(get_events_by_user).post(create_event_for_user))
        .route("/user/:user_id/upcoming", get(get_upcoming_events))
        .route("/user/:user_id/date-range", get(get_events_in_range))
        .route("/:event_id", get(get_event_by_id).delete(delete_event))
        .route("/:event_id/date", put(update_event_date))
        .route("/:event_id/featured-vendors", get(get_featured_vendors_for_event))
}

pub async fn get_all_events(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let events = app_state
        .db_client
        .get_events()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(events))
}

pub async fn get_event_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let event = app_state
        .db_client
        .get_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::EventNotFound.to_string()))?;

    Ok(Json(event))
}

pub async fn create_event(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateEventDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user_id = body
        .user_id
        .ok_or_else(|| HttpError::bad_request("User ID is required"))?;

    save_event_for(app_state, user_id, body).await
}

pub async fn create_event_for_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<CreateEventDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    save_event_for(app_state, user_id, body).await
}

async fn save_event_for(
    app_state: Arc<AppState>,
    user_id: Uuid,
    body: CreateEventDto,
) -> Result<axum::response::Response, HttpError> {
    app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::bad_request(format!("User not found with id: {}", user_id)))?;

    // A one-day event ends the day it starts
    let end_date = body.end_date.or(body.start_date);

    let event = app_state
        .db_client
        .save_event(
            user_id,
            body.name,
            body.description,
            body.start_date,
            end_date,
            body.location,
            body.budget,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Best-effort: the event exists whether or not the notification lands
    if let Err(err) = app_state
        .notification_service
        .notify_event(user_id, &event.name, "Created", event.id)
        .await
    {
        tracing::warn!("Failed to create event notification: {err}");
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": event
    }))
    .into_response())
}

pub async fn delete_event(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found(ErrorMessage::EventNotFound.to_string()));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Event deleted"
    })))
}

pub async fn get_events_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let events = app_state
        .db_client
        .get_events_by_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(events))
}

#[derive(Debug, Deserialize)]
pub struct UpcomingQuery {
    pub limit: Option<i64>,
}

pub async fn get_upcoming_events(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<UpcomingQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let events = app_state
        .calendar_service
        .get_upcoming_events(user_id, query.limit.unwrap_or(10))
        .await
        .map_err(HttpError::from)?;

    Ok(Json(events))
}

pub async fn get_events_in_range(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<DateRangeQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let events = app_state
        .db_client
        .get_events_by_user_in_range(user_id, query.start_date, query.end_date)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(events))
}

pub async fn update_event_date(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
    Json(body): Json<UpdateEventDateDto>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::EventNotFound.to_string()))?;

    let end_date = body.end_date.unwrap_or(body.start_date);

    let event = app_state
        .db_client
        .update_event_dates(event_id, body.start_date, end_date)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": event
    })))
}

pub async fn get_featured_vendors_for_event(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let matches = app_state
        .matching_service
        .featured_vendors_for_event(event_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(matches))
}
