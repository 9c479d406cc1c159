pub mod activity_service;
pub mod admin_service;
pub mod calendar_service;
pub mod chat_service;
pub mod error;
pub mod gemini_service;
pub mod matching_service;
pub mod notification_service;
pub mod review_service;
