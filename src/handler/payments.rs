// handler/payments.rs
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
    db::contractdb::ContractExt,
    dtos::contractdtos::CreatePaymentDto,
    error::HttpError,
    models::contractmodels::{PaymentMethod, PaymentStatus},
    AppState,
};

pub fn payments_handler() -> Router {
    Router::new()
        .route("/", post(create_payment))
        .route("/:payment_id", get(get_payment_by_id))
        .route("/contract/:contract_id", get(get_payments_by_contract))
}

pub async fn create_payment(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreatePaymentDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let contract = app_state
        .db_client
        .get_contract(body.contract_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found(format!("Contract not found with id: {}", body.contract_id))
        })?;

    // Unknown methods fall back to card
    let payment_method = body
        .payment_method
        .as_deref()
        .and_then(PaymentMethod::from_str)
        .unwrap_or(PaymentMethod::Card);

    // Gateway interaction is out of scope; payments record as completed
    let payment = app_state
        .db_client
        .save_payment(
            body.contract_id,
            body.amount,
            payment_method,
            PaymentStatus::Completed,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if let Some(user_id) = contract.user_id {
        if let Err(err) = app_state
            .notification_service
            .notify_payment(user_id, payment.amount, "Completed", contract.id)
            .await
        {
            tracing::warn!("Failed to create payment notification: {err}");
        }
    }

    Ok(Json(serde_json::json!({
        "message": "Payment created successfully",
        "paymentId": payment.id,
        "payment": payment
    })))
}

pub async fn get_payments_by_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(contract_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    app_state
        .db_client
        .get_contract(contract_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| {
            HttpError::not_found(format!("Contract not found with id: {}", contract_id))
        })?;

    let payments = app_state
        .db_client
        .get_payments_by_contract(contract_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(payments))
}

pub async fn get_payment_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(payment_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let payment = app_state
        .db_client
        .get_payment(payment_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Payment not found"))?;

    Ok(Json(payment))
}
