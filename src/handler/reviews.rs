// handler/reviews.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{dtos::reviewdtos::ReviewDto, error::HttpError, AppState};

pub fn reviews_handler() -> Router {
    Router::new()
        .route("/user/:user_id", post(create_review).get(get_reviews_by_user))
        .route(
            "/:review_id/user/:user_id",
            put(update_review).delete(delete_review),
        )
        .route("/vendor/:vendor_id", get(get_reviews_by_vendor))
        .route("/:review_id", get(get_review_by_id))
}

pub async fn create_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .review_service
        .create_review(user_id, &body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": review
    })))
}

pub async fn update_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((review_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<ReviewDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let review = app_state
        .review_service
        .update_review(review_id, user_id, &body)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": review
    })))
}

pub async fn delete_review(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((review_id, user_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .review_service
        .delete_review(review_id, user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Review deleted"
    })))
}

pub async fn get_reviews_by_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .review_service
        .reviews_by_vendor(vendor_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(reviews))
}

pub async fn get_reviews_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let reviews = app_state
        .review_service
        .reviews_by_user(user_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(reviews))
}

pub async fn get_review_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(review_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let review = app_state
        .review_service
        .get_review(review_id)
        .await
        .map_err(HttpError::from)?
        .ok_or_else(|| HttpError::not_found("Review not found"))?;

    Ok(Json(review))
}
