// handler/admin.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::{error::HttpError, AppState};

pub fn admin_handler() -> Router {
    Router::new()
        .route("/stats", get(get_dashboard_stats))
        .route("/vendors/pending", get(get_pending_vendors))
        .route("/vendors/best", get(get_best_vendors))
        .route("/vendors/:vendor_id/approve", put(approve_vendor))
        .route("/vendors/:vendor_id/reject", put(reject_vendor))
        .route("/support/chats", get(get_support_chats))
        .route("/reports/growth", get(get_growth_report))
}

pub async fn get_dashboard_stats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let stats = app_state
        .admin_service
        .dashboard_stats()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(stats))
}

pub async fn get_pending_vendors(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let vendors = app_state
        .admin_service
        .pending_vendors()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(vendors))
}

pub async fn approve_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let vendor = app_state
        .admin_service
        .approve_vendor(vendor_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": vendor
    })))
}

pub async fn reject_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let vendor = app_state
        .admin_service
        .reject_vendor(vendor_id)
        .await
        .map_err(HttpError::from)?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": vendor
    })))
}

pub async fn get_support_chats(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let chats = app_state
        .admin_service
        .support_chats()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(chats))
}

pub async fn get_best_vendors(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let vendors = app_state
        .admin_service
        .best_vendors()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(vendors))
}

pub async fn get_growth_report(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let report = app_state
        .admin_service
        .growth_report()
        .await
        .map_err(HttpError::from)?;

    Ok(Json(report))
}
