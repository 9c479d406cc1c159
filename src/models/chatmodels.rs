// models/chatmodels.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "sender_type", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SenderType {
    Vendor,
    User,
}

impl SenderType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value.to_uppercase().as_str() {
            "VENDOR" => Some(SenderType::Vendor),
            "USER" => Some(SenderType::User),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "message_status", rename_all = "snake_case")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageStatus {
    Sent,
    Delivered,
    Seen,
}

// A chat is vendor-to-user (user_id set, vendor2_id null) or
// vendor-to-vendor (vendor2_id set, user_id null). System chats are the
// pinned support conversations provisioned lazily per user/vendor.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Chat {
    pub id: Uuid,
    pub vendor_id: Uuid,
    pub user_id: Option<Uuid>,
    pub vendor2_id: Option<Uuid>,
    pub last_message: Option<String>,
    pub last_message_at: Option<DateTime<Utc>>,
    pub is_pinned: bool,
    pub is_system_chat: bool,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

impl Chat {
    pub fn is_vendor_to_vendor(&self) -> bool {
        self.vendor2_id.is_some()
    }

    pub fn has_participant(&self, participant_id: Uuid) -> bool {
        self.vendor_id == participant_id
            || self.user_id == Some(participant_id)
            || self.vendor2_id == Some(participant_id)
    }
}

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Message {
    pub id: Uuid,
    pub chat_id: Uuid,
    pub sender_id: Uuid,
    pub sender_type: SenderType,
    pub content: String,
    pub status: MessageStatus,

    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
