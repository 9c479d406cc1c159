// handler/contracts.rs
use std::sync::Arc;

use axum::{
    extract::Path,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::{
        contractdb::{ContractExt, NewContract},
        eventdb::EventExt,
        vendordb::VendorExt,
    },
    dtos::contractdtos::CreateContractDto,
    error::HttpError,
    AppState,
};

pub fn contracts_handler() -> Router {
    Router::new()
        .route("/", get(get_all_contracts).post(create_contract))
        .route("/event/:event_id", get(get_contracts_by_event))
        .route("/user/:user_id", get(get_contracts_by_user))
}

pub async fn create_contract(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateContractDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let mut user_id = body.user_id;

    // Without an explicit user the contract inherits the event's owner
    if let Some(event_id) = body.event_id {
        let event = app_state
            .db_client
            .get_event(event_id)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;

        if let Some(event) = event {
            if user_id.is_none() {
                user_id = Some(event.user_id);
            }
        }
    }

    let payment_deadline = body.payment_deadline.as_deref().and_then(parse_deadline);

    let contract = app_state
        .db_client
        .save_contract(NewContract {
            user_id,
            event_id: body.event_id,
            vendor_id: body.vendor_id,
            contract_text: body.contract_text,
            client_name: body.client_name,
            company_name: body.company_name,
            contact_email: body.contact_email,
            phone_number: body.phone_number,
            address: body.address,
            total_fee: body.total_fee,
            deposit_amount: body.deposit_amount,
            payment_deadline,
            venue: body.venue,
        })
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    // Best-effort notification to the contract owner
    if let (Some(user_id), Some(vendor_id)) = (contract.user_id, contract.vendor_id) {
        let vendor_name = match app_state.db_client.get_vendor(vendor_id).await {
            Ok(Some(vendor)) => vendor.company_name,
            _ => "A vendor".to_string(),
        };

        if let Err(err) = app_state
            .notification_service
            .notify_contract(user_id, &vendor_name, "Sent", contract.id)
            .await
        {
            tracing::warn!("Failed to create contract notification: {err}");
        }
    }

    Ok(Json(serde_json::json!({
        "message": "Contract saved successfully",
        "contractId": contract.id
    })))
}

/// ISO datetime, or a plain date resolved to the end of that day.
fn parse_deadline(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(datetime) = value.parse::<DateTime<Utc>>() {
        return Some(datetime);
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }

    let date_part = value.get(..10)?;
    let date = date_part.parse::<NaiveDate>().ok()?;
    date.and_hms_opt(23, 59, 59).map(|naive| naive.and_utc())
}

pub async fn get_all_contracts(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let contracts = app_state
        .db_client
        .get_contracts()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(contracts))
}

pub async fn get_contracts_by_event(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let contracts = app_state
        .db_client
        .get_contracts_by_event(event_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(contracts))
}

pub async fn get_contracts_by_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let contracts = app_state
        .db_client
        .get_contracts_by_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(contracts))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_iso_datetimes_parse_directly() {
        let parsed = parse_deadline("2026-09-01T10:30:00Z").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-09-01T10:30:00+00:00");

        let parsed = parse_deadline("2026-09-01T10:30:00").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-09-01T10:30:00+00:00");
    }

    #[test]
    fn bare_dates_resolve_to_end_of_day() {
        let parsed = parse_deadline("2026-09-01").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2026-09-01T23:59:59+00:00");
    }

    #[test]
    fn garbage_deadlines_are_dropped() {
        assert!(parse_deadline("soon").is_none());
        assert!(parse_deadline("").is_none());
    }
}
