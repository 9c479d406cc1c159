// models/chatbotmodel.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct ChatbotConversation {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub event_id: Option<Uuid>,
    pub message: String,
    pub response: Option<String>,
    pub timestamp: DateTime<Utc>,
}
