mod config;
mod db;
mod dtos;
mod error;
mod handler;
mod models;
mod routes;
mod service;
mod utils;

use std::sync::Arc;

use axum::http::{
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
    HeaderValue, Method,
};
use config::Config;
use dotenv::dotenv;
use routes::create_router;
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing_subscriber::filter::LevelFilter;

use crate::db::db::DBClient;
use service::{
    activity_service::ActivityService, admin_service::AdminService,
    calendar_service::CalendarService, chat_service::ChatService, gemini_service::GeminiService,
    matching_service::MatchingService, notification_service::NotificationService,
    review_service::ReviewService,
};

#[derive(Debug, Clone)]
pub struct AppState {
    pub env: Config,
    pub db_client: Arc<DBClient>,
    // Services
    pub calendar_service: Arc<CalendarService>,
    pub matching_service: Arc<MatchingService>,
    pub admin_service: Arc<AdminService>,
    pub activity_service: Arc<ActivityService>,
    pub chat_service: Arc<ChatService>,
    pub review_service: Arc<ReviewService>,
    pub notification_service: Arc<NotificationService>,
    pub gemini_service: Arc<GeminiService>,
}

impl AppState {
    pub fn new(db_client: DBClient, config: Config) -> Self {
        let db_client = Arc::new(db_client);

        let calendar_service = Arc::new(CalendarService::new(db_client.clone()));
        let matching_service = Arc::new(MatchingService::new(db_client.clone()));
        let admin_service = Arc::new(AdminService::new(db_client.clone()));
        let activity_service = Arc::new(ActivityService::new(db_client.clone()));
        let chat_service = Arc::new(ChatService::new(db_client.clone()));
        let review_service = Arc::new(ReviewService::new(db_client.clone()));
        let notification_service = Arc::new(NotificationService::new(db_client.clone()));
        let gemini_service = Arc::new(GeminiService::new(config.google_api_key.clone()));

        Self {
            env: config,
            db_client,
            calendar_service,
            matching_service,
            admin_service,
            activity_service,
            chat_service,
            review_service,
            notification_service,
            gemini_service,
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(LevelFilter::DEBUG)
        .init();

    dotenv().ok();

    let config = Config::init();

    let pool = match PgPoolOptions::new()
        .max_connections(20)
        .min_connections(5)
        .connect(&config.database_url)
        .await
    {
        Ok(pool) => {
            tracing::info!("Connection to the database is successful");
            pool
        }
        Err(err) => {
            tracing::error!("Failed to connect to the database: {err:?}");
            std::process::exit(1);
        }
    };

    let db_client = DBClient::new(pool);

    let allowed_origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_headers([AUTHORIZATION, ACCEPT, CONTENT_TYPE])
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ]);

    let app_state = Arc::new(AppState::new(db_client, config));

    let app = create_router(app_state.clone()).layer(cors);

    tracing::info!("Server is running on http://localhost:{}", app_state.env.port);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", app_state.env.port))
        .await
        .unwrap();

    axum::serve(listener, app).await.unwrap();
}
