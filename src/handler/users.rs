// handler/users.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::{FilterUserDto, LoginUserDto, RegisterUserDto, UpdateUserDto},
    error::{ErrorMessage, HttpError},
    models::usermodel::UserRole,
    utils::password,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route("/", get(get_all_users).post(create_user))
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/:user_id", get(get_user_by_id).put(update_user).delete(delete_user))
        .route("/:user_id/activities", get(get_user_activities))
}

pub async fn get_all_users(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let users = app_state
        .db_client
        .get_users()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(FilterUserDto::filter_users(&users)))
}

pub async fn get_user_by_id(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let user = app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    Ok(Json(FilterUserDto::filter_user(&user)))
}

pub async fn register_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    if app_state
        .db_client
        .username_exists(&body.username)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
    {
        return Err(HttpError::bad_request(ErrorMessage::UsernameExist.to_string()));
    }

    if app_state
        .db_client
        .email_exists(&body.email)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
    {
        return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
    }

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(
            body.username,
            body.email,
            hashed_password,
            body.full_name,
            body.phone,
            UserRole::Customer,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": FilterUserDto::filter_user(&user)
    })))
}

pub async fn login_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<LoginUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    // Identifier is a username first, an email second
    let mut user = app_state
        .db_client
        .get_user(None, Some(&body.login_identifier), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if user.is_none() {
        user = app_state
            .db_client
            .get_user(None, None, Some(&body.login_identifier))
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?;
    }

    let invalid_credentials = || {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "error": "Invalid credentials",
                "message": ErrorMessage::WrongCredentials.to_string()
            })),
        )
            .into_response()
    };

    let user = match user {
        Some(user) => user,
        None => return Ok(invalid_credentials()),
    };

    let stored_password = match &user.password {
        Some(stored_password) => stored_password.clone(),
        None => return Ok(invalid_credentials()),
    };

    let password_matches = password::compare(&body.password, &stored_password)
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if !password_matches {
        return Ok(invalid_credentials());
    }

    Ok(Json(FilterUserDto::filter_user(&user)).into_response())
}

pub async fn create_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<RegisterUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let hashed_password =
        password::hash(&body.password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let user = app_state
        .db_client
        .save_user(
            body.username,
            body.email,
            hashed_password,
            body.full_name,
            body.phone,
            UserRole::Customer,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(FilterUserDto::filter_user(&user)))
}

pub async fn update_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;
    body.validate_phone_number()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    app_state
        .db_client
        .get_user(Some(user_id), None, None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found(ErrorMessage::UserNotFound.to_string()))?;

    // Unique checks against other users
    if let Some(ref email) = body.email {
        if let Some(existing) = app_state
            .db_client
            .get_user(None, None, Some(email))
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
        {
            if existing.id != user_id {
                return Err(HttpError::bad_request(ErrorMessage::EmailExist.to_string()));
            }
        }
    }

    if let Some(ref username) = body.username {
        if let Some(existing) = app_state
            .db_client
            .get_user(None, Some(username), None)
            .await
            .map_err(|e| HttpError::server_error(e.to_string()))?
        {
            if existing.id != user_id {
                return Err(HttpError::bad_request(ErrorMessage::UsernameExist.to_string()));
            }
        }
    }

    let hashed_password = match body.password {
        Some(ref new_password) => Some(
            password::hash(new_password).map_err(|e| HttpError::server_error(e.to_string()))?,
        ),
        None => None,
    };

    let user = app_state
        .db_client
        .update_user(
            user_id,
            body.full_name,
            body.phone,
            body.email,
            body.username,
            hashed_password,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": FilterUserDto::filter_user(&user)
    })))
}

pub async fn delete_user(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_user(user_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    if deleted == 0 {
        return Err(HttpError::not_found(ErrorMessage::UserNotFound.to_string()));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "User deleted"
    })))
}

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<usize>,
}

pub async fn get_user_activities(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ActivityQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let activities = app_state
        .activity_service
        .user_activities(user_id, query.limit.unwrap_or(20))
        .await
        .map_err(HttpError::from)?;

    Ok(Json(activities))
}
