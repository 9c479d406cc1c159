// routes.rs
use std::sync::Arc;

use axum::{routing::get, Extension, Json, Router};
use tower_http::trace::TraceLayer;
use serde_json::json;

use crate::{
    handler::{
        admin::admin_handler, calendar::calendar_handler, chat::chat_handler,
        chatbot::chatbot_handler, contracts::contracts_handler, events::events_handler,
        gemini::gemini_handler, messages::messages_handler,
        notification_handler::notification_handler, packages::packages_handler,
        payments::payments_handler, reviews::reviews_handler, users::users_handler,
        vendor::vendor_handler,
    },
    AppState,
};

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/users", users_handler())
        .nest("/vendors", vendor_handler())
        .nest("/events", events_handler())
        .nest("/chats", chat_handler())
        .nest("/messages", messages_handler())
        .nest("/contracts", contracts_handler())
        .nest("/payments", payments_handler())
        .nest("/reviews", reviews_handler())
        .nest("/notifications", notification_handler())
        .nest("/admin", admin_handler())
        .nest("/calendar", calendar_handler())
        .nest("/vendor-packages", packages_handler())
        .nest("/chatbot", chatbot_handler())
        .nest("/gemini", gemini_handler())
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state));

    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
}
