use crate::app::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::family::CreateFamilyMemberRequest;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

fn check_owner(auth: &AuthenticatedUser, user_id: Uuid) -> Result<(), ApiError> {
    if auth.user_id != user_id {
        return Err(ApiError::Forbidden(
            "Cannot access another user's family members".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_family_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    check_owner(&auth, user_id)?;
    let members = state.families.list_for_user(user_id).await?;
    Ok(Json(json!({ "family_members": members })))
}

pub async fn create_family_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreateFamilyMemberRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    check_owner(&auth, user_id)?;
    if payload.nickname.trim().is_empty() {
        return Err(ApiError::BadRequest("nickname must not be empty".to_string()));
    }
    if payload.relation.trim().is_empty() {
        return Err(ApiError::BadRequest("relation must not be empty".to_string()));
    }

    let member = state.families.create(user_id, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "family_member": member })),
    ))
}

pub async fn delete_family_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((user_id, member_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    check_owner(&auth, user_id)?;
    if state.families.delete(user_id, member_id).await? {
        Ok(Json(json!({ "message": "Family member deleted" })))
    } else {
        Err(ApiError::NotFound("Family member not found".to_string()))
    }
}
