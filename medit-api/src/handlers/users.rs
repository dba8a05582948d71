use crate::app::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::user::{
    CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse,
};
use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    MAX_PAGE_SIZE
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if payload.login_id.trim().is_empty() {
        return Err(ApiError::BadRequest("login_id must not be empty".to_string()));
    }
    if payload.nickname.trim().is_empty() {
        return Err(ApiError::BadRequest("nickname must not be empty".to_string()));
    }
    if payload.password.len() < 8 {
        return Err(ApiError::BadRequest(
            "password must be at least 8 characters".to_string(),
        ));
    }

    if state
        .users
        .find_by_login_id(&payload.login_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict("Login ID already exists".to_string()));
    }

    let user = state.users.create(&payload).await?;
    tracing::info!("user registered: {}", user.login_id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": UserResponse::from(user)
        })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let user = state
        .users
        .verify_password(&payload.login_id, &payload.password)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    if !user.is_active {
        return Err(ApiError::Forbidden("Account is disabled".to_string()));
    }

    state.users.update_last_login(user.id).await?;

    let (token, expires_at) = state.auth.issue_token(user.id, &user.login_id)?;
    tracing::info!("user logged in: {}", user.login_id);

    Ok(Json(LoginResponse {
        user: UserResponse::from(user),
        token,
        expires_at,
    }))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Value>, ApiError> {
    let limit = pagination.limit.clamp(1, MAX_PAGE_SIZE);
    let skip = pagination.skip.max(0);

    let users = state.users.list(limit, skip).await?;
    let user_responses: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(json!({ "users": user_responses })))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({ "user": UserResponse::from(user) })))
}

pub async fn update_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<Value>, ApiError> {
    if auth.user_id != id {
        return Err(ApiError::Forbidden(
            "Cannot modify another user's account".to_string(),
        ));
    }

    let user = state
        .users
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(json!({
        "message": "User updated successfully",
        "user": UserResponse::from(user)
    })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    if auth.user_id != id {
        return Err(ApiError::Forbidden(
            "Cannot delete another user's account".to_string(),
        ));
    }

    if state.users.delete(id).await? {
        Ok(Json(json!({ "message": "User deleted successfully" })))
    } else {
        Err(ApiError::NotFound("User not found".to_string()))
    }
}
