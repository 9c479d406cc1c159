// handler/calendar.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::eventdb::EventExt,
    dtos::calendardtos::{AvailabilityQueryDto, DateSelectionDto, SuggestionsQueryDto},
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn calendar_handler() -> Router {
    Router::new()
        .route("/check-availability", post(check_date_availability))
        .route("/validate-date", post(validate_date_selection))
        .route("/availability/:user_id", get(get_available_dates))
        .route("/suggestions/:user_id", get(get_suggested_dates))
        .route("/upcoming-events/:user_id", get(get_upcoming_events))
        .route("/create-event", post(create_event_with_date))
        .route("/update-event-date/:event_id", put(update_event_date))
}

pub async fn check_date_availability(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<DateSelectionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .calendar_service
        .check_date_availability(&body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(result))
}

pub async fn validate_date_selection(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<DateSelectionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let result = app_state
        .calendar_service
        .validate_date_selection(&body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(result))
}

pub async fn get_available_dates(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<AvailabilityQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    if query.end_date < query.start_date {
        return Err(HttpError::bad_request("End date must not precede start date"));
    }

    let result = app_state
        .calendar_service
        .get_available_dates(user_id, query.start_date, query.end_date)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(result))
}

pub async fn get_suggested_dates(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<SuggestionsQueryDto>,
) -> Result<impl IntoResponse, HttpError> {
    let suggestions = app_state
        .calendar_service
        .get_suggested_dates(
            user_id,
            query.preferred_date,
            query.number_of_suggestions.unwrap_or(5),
        )
        .await
        .map_err(HttpError::from)?;

    Ok(Json(suggestions))
}

#[derive(Debug, serde::Deserialize)]
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

// Validate the selected date, then create the event in one step
pub async fn create_event_with_date(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<DateSelectionDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let validation = app_state
        .calendar_service
        .validate_date_selection(&body)
        .await
        .map_err(HttpError::from)?;

    if !validation.is_date_available {
        return Err(HttpError::bad_request(validation.message));
    }

    let name = body
        .event_name
        .clone()
        .ok_or_else(|| HttpError::bad_request("Event name is required"))?;

    let end_date = body.end_date.unwrap_or(body.selected_date);

    let event = app_state
        .db_client
        .save_event(
            body.user_id,
            name,
            body.event_description.clone(),
            Some(body.selected_date),
            Some(end_date),
            body.location.clone(),
            body.budget,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": event
    })))
}

pub async fn update_event_date(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
    Json(mut body): Json<DateSelectionDto>,
) -> Result<impl IntoResponse, HttpError> {
    let event = app_state
        .db_client
        .get_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::EventNotFound.to_string()))?;

    // Conflicts are checked against the calendar of the event's owner
    body.user_id = event.user_id;

    let validation = app_state
        .calendar_service
        .validate_date_selection(&body)
        .await
        .map_err(HttpError::from)?;

    if !validation.is_date_available {
        return Err(HttpError::bad_request(validation.message));
    }

    let end_date = body
        .end_date
        .or(event.end_date)
        .unwrap_or(body.selected_date);

    let event = app_state
        .db_client
        .update_event_dates(event_id, body.selected_date, end_date)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": event
    })))
}
