pub mod admin;
pub mod calendar;
pub mod chat;
pub mod chatbot;
pub mod contracts;
pub mod events;
pub mod gemini;
pub mod messages;
pub mod notification_handler;
pub mod packages;
pub mod payments;
pub mod reviews;
pub mod users;
pub mod vendor;
