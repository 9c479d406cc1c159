// models/notificationmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    Event,
    Contract,
    Message,
    Payment,
    System,
}

impl NotificationType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "EVENT" => Some(NotificationType::Event),
            "CONTRACT" => Some(NotificationType::Contract),
            "MESSAGE" => Some(NotificationType::Message),
            "PAYMENT" => Some(NotificationType::Payment),
            "SYSTEM" => Some(NotificationType::System),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    #[sqlx(rename = "notification_type")]
    pub r#type: NotificationType,
    pub title: String,
    pub description: Option<String>,
    pub message: Option<String>,
    pub action_url: Option<String>,
    pub read: bool,
    pub read_at: Option<DateTime<Utc>>,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
