// dtos/chatdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateChatDto {
    pub vendor_id: Option<Uuid>,
    // Set for vendor-to-user chats
    pub user_id: Option<Uuid>,
    // Set for vendor-to-vendor chats
    pub vendor2_id: Option<Uuid>,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SendMessageDto {
    pub chat_id: Uuid,
    pub sender_id: Uuid,

    // VENDOR or USER
    #[validate(length(min = 1, message = "Sender type is required"))]
    pub sender_type: String,

    #[validate(length(min = 1, message = "Message content is required"))]
    pub content: String,
}
