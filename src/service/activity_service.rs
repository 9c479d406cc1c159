// service/activity_service.rs
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    db::{
        chatdb::ChatExt, contractdb::ContractExt, db::DBClient, eventdb::EventExt,
        reviewdb::ReviewExt, vendordb::VendorExt,
    },
    models::{chatmodels::SenderType, contractmodels::PaymentStatus},
    service::error::ServiceError,
};

// Messages older than this never make it into the feed.
const MESSAGE_FEED_WINDOW_DAYS: i64 = 30;
const DEFAULT_FEED_LIMIT: usize = 20;

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ActivityItem {
    #[serde(rename = "type")]
    pub activity_type: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub entity_id: Uuid,
    pub entity_type: String,
    pub time_ago: String,
}

#[derive(Debug, Clone)]
pub struct ActivityService {
    db_client: Arc<DBClient>,
}

impl ActivityService {
    pub fn new(db_client: Arc<DBClient>) -> Self {
        Self { db_client }
    }

    /// Chronological feed of a user's events, contracts, payments, recent
    /// messages, and reviews, newest first.
    pub async fn user_activities(
        &self,
        user_id: Uuid,
        limit: usize,
    ) -> Result<Vec<ActivityItem>, ServiceError> {
        let now = Utc::now();
        let mut activities = Vec::new();

        for event in self.db_client.get_events_by_user(user_id).await? {
            activities.push(raw_item(
                "EVENT_CREATED",
                format!("Created event \"{}\"", event.name),
                event.created_at,
                event.id,
                "event",
            ));
        }

        let contracts = self.db_client.get_contracts_by_user(user_id).await?;
        for contract in &contracts {
            let event_name = match contract.event_id {
                Some(event_id) => self
                    .db_client
                    .get_event(event_id)
                    .await?
                    .map(|event| event.name)
                    .unwrap_or_else(|| "event".to_string()),
                None => "event".to_string(),
            };

            activities.push(raw_item(
                "CONTRACT_CREATED",
                format!("Created contract for \"{}\"", event_name),
                contract.created_at,
                contract.id,
                "contract",
            ));

            if contract.signed {
                if let Some(signed_at) = contract.signed_at {
                    activities.push(raw_item(
                        "CONTRACT_SIGNED",
                        format!("Signed contract for \"{}\"", event_name),
                        signed_at,
                        contract.id,
                        "contract",
                    ));
                }
            }

            for payment in self.db_client.get_payments_by_contract(contract.id).await? {
                if payment.payment_status == PaymentStatus::Completed {
                    activities.push(raw_item(
                        "PAYMENT_COMPLETED",
                        format!("Completed payment of Rs. {:.2}", payment.amount),
                        payment.payment_date,
                        payment.id,
                        "payment",
                    ));
                }
            }
        }

        let message_cutoff = now - Duration::days(MESSAGE_FEED_WINDOW_DAYS);
        for message in self
            .db_client
            .get_recent_messages_by_sender(user_id, SenderType::User, message_cutoff)
            .await?
        {
            activities.push(raw_item(
                "MESSAGE_SENT",
                "Sent a message".to_string(),
                message.created_at,
                message.id,
                "message",
            ));
        }

        for review in self.db_client.get_reviews_by_user(user_id).await? {
            let vendor_name = self
                .db_client
                .get_vendor(review.vendor_id)
                .await?
                .map(|vendor| vendor.company_name)
                .unwrap_or_else(|| "vendor".to_string());

            activities.push(raw_item(
                "REVIEW_CREATED",
                format!("Reviewed \"{}\"", vendor_name),
                review.created_at,
                review.id,
                "review",
            ));
        }

        activities.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let limit = if limit > 0 { limit } else { DEFAULT_FEED_LIMIT };
        activities.truncate(limit);

        for activity in &mut activities {
            activity.time_ago = format_time_ago(activity.timestamp, now);
        }

        Ok(activities)
    }
}

fn raw_item(
    activity_type: &str,
    text: String,
    timestamp: DateTime<Utc>,
    entity_id: Uuid,
    entity_type: &str,
) -> ActivityItem {
    ActivityItem {
        activity_type: activity_type.to_string(),
        text,
        timestamp,
        entity_id,
        entity_type: entity_type.to_string(),
        time_ago: String::new(),
    }
}

/// Relative-time label with fixed thresholds; anything a week or older
/// falls back to the absolute date.
fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - timestamp;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!(
            "{} minute{} ago",
            minutes,
            if minutes == 1 { "" } else { "s" }
        )
    } else if hours < 24 {
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if days < 7 {
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        timestamp.date_naive().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        "2026-08-06T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn sub_minute_is_just_now() {
        assert_eq!(format_time_ago(now() - Duration::seconds(30), now()), "Just now");
    }

    #[test]
    fn minutes_hours_days_thresholds() {
        assert_eq!(
            format_time_ago(now() - Duration::minutes(1), now()),
            "1 minute ago"
        );
        assert_eq!(
            format_time_ago(now() - Duration::minutes(45), now()),
            "45 minutes ago"
        );
        assert_eq!(
            format_time_ago(now() - Duration::hours(1), now()),
            "1 hour ago"
        );
        assert_eq!(
            format_time_ago(now() - Duration::hours(23), now()),
            "23 hours ago"
        );
        assert_eq!(
            format_time_ago(now() - Duration::days(1), now()),
            "1 day ago"
        );
        assert_eq!(
            format_time_ago(now() - Duration::days(6), now()),
            "6 days ago"
        );
    }

    #[test]
    fn a_week_or_older_shows_the_absolute_date() {
        assert_eq!(
            format_time_ago(now() - Duration::days(7), now()),
            "2026-07-30"
        );
        assert_eq!(
            format_time_ago(now() - Duration::days(40), now()),
            "2026-06-27"
        );
    }
}
