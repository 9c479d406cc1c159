// dtos/calendardtos.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSelectionDto {
    pub user_id: Uuid,
    pub event_id: Option<Uuid>,
    pub selected_date: NaiveDate,

    // Fields used when creating an event straight from the calendar
    pub end_date: Option<NaiveDate>,
    pub event_name: Option<String>,
    pub event_description: Option<String>,
    pub location: Option<String>,
    pub budget: Option<f64>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DateSelectionResponse {
    pub event_id: Option<Uuid>,
    pub user_id: Uuid,
    pub selected_date: NaiveDate,
    pub is_date_available: bool,
    pub message: String,
    pub status: String,
}

impl DateSelectionResponse {
    pub fn available(selection: &DateSelectionDto, message: impl Into<String>) -> Self {
        DateSelectionResponse {
            event_id: selection.event_id,
            user_id: selection.user_id,
            selected_date: selection.selected_date,
            is_date_available: true,
            message: message.into(),
            status: "SUCCESS".to_string(),
        }
    }

    pub fn unavailable(selection: &DateSelectionDto, message: impl Into<String>) -> Self {
        DateSelectionResponse {
            event_id: selection.event_id,
            user_id: selection.user_id,
            selected_date: selection.selected_date,
            is_date_available: false,
            message: message.into(),
            status: "ERROR".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventDateConflict {
    pub event_id: Uuid,
    pub event_name: String,
    pub conflict_date: NaiveDate,
    pub conflict_type: String,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CalendarAvailabilityResponse {
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub available_dates: Vec<NaiveDate>,
    pub unavailable_dates: Vec<NaiveDate>,
    pub conflicts: Vec<EventDateConflict>,
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQueryDto {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsQueryDto {
    pub preferred_date: NaiveDate,
    pub number_of_suggestions: Option<usize>,
}
