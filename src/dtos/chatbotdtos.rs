// dtos/chatbotdtos.rs
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateConversationDto {
    pub user_id: Option<Uuid>,
    pub event_id: Option<Uuid>,

    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,

    pub response: Option<String>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestDto {
    #[validate(length(min = 1, message = "Input text is required"))]
    pub input_text: String,

    pub api_key: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponseDto {
    pub generated_response: String,
}
