// handler/packages.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::vendordb::VendorExt,
    dtos::vendordtos::VendorPackageDto,
    error::{ErrorMessage, HttpError},
    AppState,
};

pub fn packages_handler() -> Router {
    Router::new()
        .route("/vendor/:vendor_id", post(create_package).get(get_packages_by_vendor))
        .route("/vendor/:vendor_id/active", get(get_active_packages_by_vendor))
        .route(
            "/:package_id/vendor/:vendor_id",
            put(update_package).delete(delete_package),
        )
        .route("/:package_id", get(get_package_by_id))
}

pub async fn create_package(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
    Json(body): Json<VendorPackageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::VendorNotFound.to_string()))?;

    let package = app_state
        .db_client
        .save_package(
            vendor_id,
            body.package_name,
            body.description,
            body.price,
            body.features,
            body.duration,
            body.is_active.unwrap_or(true),
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": package
    })))
}

pub async fn update_package(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((package_id, vendor_id)): Path<(Uuid, Uuid)>,
    Json(body): Json<VendorPackageDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let package = app_state
        .db_client
        .get_package(package_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Package not found with id: {}", package_id)))?;

    if package.vendor_id != vendor_id {
        return Err(HttpError::unauthorized(
            "Vendor is not authorized to update this package",
        ));
    }

    let package = app_state
        .db_client
        .update_package(
            package_id,
            body.package_name,
            body.description,
            body.price,
            body.features,
            body.duration,
            body.is_active,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": package
    })))
}

pub async fn delete_package(
    Extension(app_state): Extension<Arc<AppState>>,
    Path((package_id, vendor_id)): Path<(Uuid, Uuid)>,
) -> Result<impl IntoResponse, HttpError> {
    let package = app_state
        .db_client
        .get_package(package_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Package not found with id: {}", package_id)))?;

    if package.vendor_id != vendor_id {
        return Err(HttpError::unauthorized(
            "Vendor is not authorized to delete this package",
        ));
    }

    app_state
        .db_client
        .delete_package(package_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Package deleted"
    })))
}

pub async fn get_packages_by_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let packages = app_state
        .db_client
        .get_packages_by_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(packages))
}

pub async fn get_active_packages_by_vendor(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(vendor_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let packages = app_state
        .db_client
        .get_active_packages_by_vendor(vendor_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(packages))
}

pub async fn get_package_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(package_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let package = app_state
        .db_client
        .get_package(package_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(format!("Package not found with id: {}", package_id)))?;

    Ok(Json(package))
}
