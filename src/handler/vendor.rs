// handler/vendor.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{reviewdb::ReviewExt, userdb::UserExt, vendordb::VendorExt},
    dtos::vendordtos::{VendorRegDto, VendorUpdateDto},
    error::{ErrorMessage, HttpError},
    models::{
        usermodel::UserRole,
        vendormodels::{ApprovalStatus, Vendor},
    },
    AppState,
};

pub fn vendor_handler() -> Router {
    Router::new()
        .route("/", get(get_all_vendors))
        .route("/register/:user_id", post(register_vendor))
        .route("/featured", get(get_featured_vendors))
        .route("/:vendor_id", get(get_vendor_by_id))
        .route("/:vendor_id/details", get(get_vendor_details))
        .route("/:vendor_id/user/:user_id", put(update_vendor))
        .route("/user/:user_id", get(get_vendor_by_user))
}

pub async fn register_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<VendorRegDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    if app_state
        .db_client
        .vendor_exists_for_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
    {
        return Err(HttpError::bad_request(
            "User is already registered as a Vendor",
        ));
    }

    let vendor = app_state
        .db_client
        .save_vendor(
            user_id,
            body.company_name,
            body.service_type,
            body.address,
            body.main_photo_url,
            body.detail_photo_url,
            body.details,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Registering as a vendor flips the account role
    app_state
        .db_client
        .update_user_role(user.id, UserRole::Vendor)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": vendor
    })))
}

pub async fn get_all_vendors(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let vendors = app_state
        .db_client
        .get_vendors()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(vendors))
}

pub async fn get_vendor_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let vendor = app_state
        .db_client
        .get_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::VendorNotFound.to_string()))?;

    Ok(Json(vendor))
}

pub async fn get_vendor_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let vendor = app_state
        .db_client
        .get_vendor_by_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::VendorNotFound.to_string()))?;

    Ok(Json(vendor))
}

// Vendor profile plus its reviews, packages, and event assignments
pub async fn get_vendor_details(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let vendor = app_state
        .db_client
        .get_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::VendorNotFound.to_string()))?;

    let reviews = app_state
        .db_client
        .get_reviews_by_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let packages = app_state
        .db_client
        .get_packages_by_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let assignments = app_state
        .db_client
        .get_event_assignments_by_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    let review_count = reviews.len();
    let package_count = packages.len();

    Ok(Json(serde_json::json!({
        "vendor": vendor,
        "reviews": reviews,
        "packages": packages,
        "assignments": assignments,
        "reviewCount": review_count,
        "packageCount": package_count,
    })))
}

pub async fn update_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((vendor_id, user_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<VendorUpdateDto>,
) -> Result<impl IntoResponse, HttpError> {
    let vendor = app_state
        .db_client
        .get_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::VendorNotFound.to_string()))?;

    if vendor.user_id != user_id {
        return Err(HttpError::unauthorized(
            "User is not authorized to update this vendor",
        ));
    }

    let vendor = app_state
        .db_client
        .update_vendor(
            vendor_id,
            body.company_name,
            body.service_type,
            body.address,
            body.main_photo_url,
            body.detail_photo_url,
            body.details,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": vendor
    })))
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<usize>,
}

// Approved vendors with a rating, best rated first
pub async fn get_featured_vendors(
    Extension(app_state): Extension<Arc<AppState>>,
    Query(query): Query<FeaturedQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let limit = match query.limit {
        Some(limit) if limit > 0 => limit,
        _ => 6,
    };

    let mut vendors: Vec<Vendor> = app_state
        .db_client
        .get_vendors_by_status(ApprovalStatus::Approved)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .into_iter()
        .filter(|vendor| vendor.rating > 0.0)
        .collect();

    vendors.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                a.company_name
                    .to_lowercase()
                    .cmp(&b.company_name.to_lowercase())
            })
    });
    vendors.truncate(limit);

    Ok(Json(vendors))
}
