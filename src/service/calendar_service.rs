// service/calendar_service.rs
use std::sync::Arc;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    db::{db::DBClient, eventdb::EventExt},
    dtos::calendardtos::{
        CalendarAvailabilityResponse, DateSelectionDto, DateSelectionResponse, EventDateConflict,
    },
    models::eventmodel::Event,
    service::error::ServiceError,
};

// Selections more than two years out are rejected.
const MAX_DAYS_AHEAD: i64 = 730;
// Suggestion probes fan out around the preferred date, 30 probes max.
const SUGGESTION_SEARCH_DAYS: i64 = 30;

#[derive(Debug, Clone)]
pub struct CalendarService {
    db_client: Arc<DBClient>,
}

impl CalendarService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Check whether a date is free of conflicts with the user's events.
    pub async fn check_date_availability(
        &self,
        selection: &DateSelectionDto,
    ) -> Result<DateSelectionResponse, ServiceError> {
        let user_events = self.db_client.get_events_by_user(selection.user_id).await?;
        Ok(check_against_events(&user_events, selection))
    }

    /// Business-rule validation (no past dates, max two years out), then the
    /// availability check.
    pub async fn validate_date_selection(
        &self,
        selection: &DateSelectionDto,
    ) -> Result<DateSelectionResponse, ServiceError> {
        let today = Utc::now().date_naive();

        if let Some(message) = validate_selection_window(selection.selected_date, today) {
            return Ok(DateSelectionResponse::unavailable(selection, message));
        }

        self.check_date_availability(selection).await
    }

    /// Day-by-day availability over an inclusive date range.
    pub async fn get_available_dates(
        &self,
        user_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<CalendarAvailabilityResponse, ServiceError> {
        let user_events = self.db_client.get_events_by_user(user_id).await?;

        let mut available_dates = Vec::new();
        let mut unavailable_dates = Vec::new();
        let mut conflicts = Vec::new();

        let mut current_date = start_date;
        while current_date <= end_date {
            match find_conflict(&user_events, current_date) {
                Some(event) => {
                    unavailable_dates.push(current_date);
                    conflicts.push(EventDateConflict {
                        event_id: event.id,
                        event_name: event.name.clone(),
                        conflict_date: current_date,
                        conflict_type: "OVERLAP".to_string(),
                    });
                }
                None => available_dates.push(current_date),
            }
            current_date = current_date + Duration::days(1);
        }

        Ok(CalendarAvailabilityResponse {
            user_id,
            start_date,
            end_date,
            available_dates,
            unavailable_dates,
            conflicts,
            message: "Calendar availability retrieved successfully".to_string(),
            success: true,
        })
    }

    /// Suggest up to `number_of_suggestions` free dates around a preferred one.
    pub async fn get_suggested_dates(
        &self,
        user_id: Uuid,
        preferred_date: NaiveDate,
        number_of_suggestions: usize,
    ) -> Result<Vec<NaiveDate>, ServiceError> {
        let user_events = self.db_client.get_events_by_user(user_id).await?;
        let today = Utc::now().date_naive();

        Ok(suggest_dates(
            &user_events,
            preferred_date,
            number_of_suggestions,
            today,
        ))
    }

    pub async fn get_upcoming_events(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<Event>, ServiceError> {
        let today = Utc::now().date_naive();
        let events = self
            .db_client
            .get_upcoming_events_by_user(user_id, today, limit)
            .await?;
        Ok(events)
    }
}

/// Inclusive [start, end] containment; events without both dates never conflict.
fn is_date_in_range(date: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(start), Some(end)) => date >= start && date <= end,
        _ => false,
    }
}

/// First conflicting event in query order. Which event wins when several
/// overlap is not part of the API contract.
fn find_conflict(events: &[Event], date: NaiveDate) -> Option<&Event> {
    events
        .iter()
        .find(|event| is_date_in_range(date, event.start_date, event.end_date))
}

fn validate_selection_window(selected_date: NaiveDate, today: NaiveDate) -> Option<String> {
    if selected_date < today {
        return Some("Cannot select a date in the past".to_string());
    }

    if (selected_date - today).num_days() > MAX_DAYS_AHEAD {
        return Some("Date is too far in the future (maximum 2 years)".to_string());
    }

    None
}

fn check_against_events(events: &[Event], selection: &DateSelectionDto) -> DateSelectionResponse {
    match find_conflict(events, selection.selected_date) {
        None => DateSelectionResponse::available(selection, "Date is available for your event"),
        Some(event) => DateSelectionResponse::unavailable(
            selection,
            format!("Date conflicts with existing event: {}", event.name),
        ),
    }
}

/// Probe the preferred date, then +1, -1, +2, -2, ... days around it,
/// clamping probes that land before today back to tomorrow.
fn suggest_dates(
    events: &[Event],
    preferred_date: NaiveDate,
    number_of_suggestions: usize,
    today: NaiveDate,
) -> Vec<NaiveDate> {
    let mut suggestions = Vec::new();
    let mut search_date = preferred_date;

    for i in 0..SUGGESTION_SEARCH_DAYS {
        if suggestions.len() >= number_of_suggestions {
            break;
        }

        if find_conflict(events, search_date).is_none() {
            suggestions.push(search_date);
        }

        let offset = Duration::days(i / 2 + 1);
        search_date = if i % 2 == 0 {
            preferred_date + offset
        } else {
            preferred_date - offset
        };

        if search_date < today {
            search_date = today + Duration::days(1);
        }
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::eventmodel::EventStatus;
    use chrono::{DateTime, Utc};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event(name: &str, start: NaiveDate, end: NaiveDate) -> Event {
        let now: DateTime<Utc> = Utc::now();
        Event {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            start_date: Some(start),
            end_date: Some(end),
            location: None,
            budget: None,
            status: EventStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn range_check_is_inclusive_on_both_ends() {
        let start = date(2026, 1, 10);
        let end = date(2026, 1, 15);

        assert!(is_date_in_range(start, Some(start), Some(end)));
        assert!(is_date_in_range(end, Some(start), Some(end)));
        assert!(is_date_in_range(date(2026, 1, 12), Some(start), Some(end)));
        assert!(!is_date_in_range(date(2026, 1, 9), Some(start), Some(end)));
        assert!(!is_date_in_range(date(2026, 1, 16), Some(start), Some(end)));
    }

    #[test]
    fn events_without_dates_never_conflict() {
        assert!(!is_date_in_range(date(2026, 1, 12), None, Some(date(2026, 1, 15))));
        assert!(!is_date_in_range(date(2026, 1, 12), Some(date(2026, 1, 10)), None));
    }

    #[test]
    fn conflict_names_the_overlapping_event() {
        let events = vec![event("Wedding", date(2026, 1, 10), date(2026, 1, 15))];

        let conflict = find_conflict(&events, date(2026, 1, 12));
        assert_eq!(conflict.map(|e| e.name.as_str()), Some("Wedding"));
        assert!(find_conflict(&events, date(2026, 1, 16)).is_none());
    }

    #[test]
    fn past_and_far_future_dates_are_rejected() {
        let today = date(2026, 8, 6);

        assert_eq!(
            validate_selection_window(date(2026, 8, 5), today),
            Some("Cannot select a date in the past".to_string())
        );
        assert_eq!(validate_selection_window(today, today), None);
        // 730 days out is the last accepted date
        assert_eq!(
            validate_selection_window(today + Duration::days(730), today),
            None
        );
        assert_eq!(
            validate_selection_window(today + Duration::days(731), today),
            Some("Date is too far in the future (maximum 2 years)".to_string())
        );
    }

    #[test]
    fn suggestions_fan_out_around_the_preferred_date() {
        let today = date(2026, 8, 1);
        let preferred = date(2026, 8, 10);
        // Preferred date and the day after are both taken
        let events = vec![event("Launch", date(2026, 8, 10), date(2026, 8, 11))];

        let suggestions = suggest_dates(&events, preferred, 3, today);

        // Probes run preferred, +1, -1, +2, ... so the first free dates are
        // -1, +2, -2.
        assert_eq!(
            suggestions,
            vec![date(2026, 8, 9), date(2026, 8, 12), date(2026, 8, 8)]
        );
    }

    #[test]
    fn suggestions_never_land_in_the_past() {
        let today = date(2026, 8, 10);
        let preferred = today; // negative probes would fall before today
        let events: Vec<Event> = Vec::new();

        let suggestions = suggest_dates(&events, preferred, 5, today);

        assert!(suggestions.iter().all(|d| *d >= today));
    }

    #[test]
    fn collects_at_most_the_requested_number() {
        let today = date(2026, 8, 1);
        let events: Vec<Event> = Vec::new();

        let suggestions = suggest_dates(&events, date(2026, 8, 10), 4, today);
        assert_eq!(suggestions.len(), 4);
    }
}
