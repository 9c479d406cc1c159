use crate::error::HttpError;
use axum::http::StatusCode;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("User not found with id: {0}")]
    UserNotFound(Uuid),

    #[error("Vendor not found with id: {0}")]
    VendorNotFound(Uuid),

    #[error("Event not found with id: {0}")]
    EventNotFound(Uuid),

    #[error("Chat not found with id: {0}")]
    ChatNotFound(Uuid),

    #[error("Contract not found with id: {0}")]
    ContractNotFound(Uuid),

    #[error("Review not found with id: {0}")]
    ReviewNotFound(Uuid),

    #[error("Package not found with id: {0}")]
    PackageNotFound(Uuid),

    #[error("Notification not found with id: {0}")]
    NotificationNotFound(Uuid),

    #[error("User is already registered as a Vendor")]
    AlreadyVendor,

    #[error("User has already reviewed this vendor")]
    DuplicateReview,

    #[error("User is not a participant in this chat")]
    NotChatParticipant,

    #[error("Invalid sender type. Must be VENDOR or USER")]
    InvalidSenderType,

    #[error("{0}")]
    SenderMismatch(String),

    #[error("Users cannot send messages in vendor-to-vendor chats")]
    UserInVendorChat,

    #[error("User is not authorized to perform this action")]
    Unauthorized,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Upstream request error: {0}")]
    Upstream(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<ServiceError> for HttpError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::UserNotFound(_)
            | ServiceError::VendorNotFound(_)
            | ServiceError::EventNotFound(_)
            | ServiceError::ChatNotFound(_)
            | ServiceError::ContractNotFound(_)
            | ServiceError::ReviewNotFound(_)
            | ServiceError::PackageNotFound(_)
            | ServiceError::NotificationNotFound(_) => HttpError::not_found(error.to_string()),

            ServiceError::AlreadyVendor
            | ServiceError::DuplicateReview
            | ServiceError::NotChatParticipant
            | ServiceError::InvalidSenderType
            | ServiceError::SenderMismatch(_)
            | ServiceError::UserInVendorChat
            | ServiceError::Validation(_) => HttpError::bad_request(error.to_string()),

            ServiceError::Unauthorized => HttpError::unauthorized(error.to_string()),

            ServiceError::Upstream(_) | ServiceError::Database(_) => {
                HttpError::server_error(error.to_string())
            }
        }
    }
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::UserNotFound(_)
            | ServiceError::VendorNotFound(_)
            | ServiceError::EventNotFound(_)
            | ServiceError::ChatNotFound(_)
            | ServiceError::ContractNotFound(_)
            | ServiceError::ReviewNotFound(_)
            | ServiceError::PackageNotFound(_)
            | ServiceError::NotificationNotFound(_) => StatusCode::NOT_FOUND,

            ServiceError::AlreadyVendor
            | ServiceError::DuplicateReview
            | ServiceError::NotChatParticipant
            | ServiceError::InvalidSenderType
            | ServiceError::SenderMismatch(_)
            | ServiceError::UserInVendorChat
            | ServiceError::Validation(_) => StatusCode::BAD_REQUEST,

            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,

            ServiceError::Upstream(_) | ServiceError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
