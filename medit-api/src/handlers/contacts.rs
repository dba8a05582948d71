use crate::app::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::contact::CreateContactRequest;
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
            "Cannot access another user's contacts".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    check_owner(&auth, user_id)?;
    let contacts = state.contacts.list_for_user(user_id).await?;
    Ok(Json(json!({ "contacts": contacts })))
}

pub async fn create_contact(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    check_owner(&auth, user_id)?;

    let contact_user = state
        .users
        .find_by_login_id(&payload.contact_login_id)
        .await?
        .ok_or_else(|| {
            ApiError::BadRequest(format!(
                "No user with login ID '{}'",
                payload.contact_login_id
            ))
        })?;

    if contact_user.id == user_id {
        return Err(ApiError::Conflict(
            "Cannot add yourself as a contact".to_string(),
        ));
    }
    if state.contacts.exists(user_id, contact_user.id).await? {
        return Err(ApiError::Conflict("Contact already exists".to_string()));
    }

    let contact = state
        .contacts
        .create(
            user_id,
            contact_user.id,
            payload.alias_nickname.as_deref(),
            payload.relation.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "contact": contact }))))
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path((user_id, contact_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<Value>, ApiError> {
    check_owner(&auth, user_id)?;
    if state.contacts.delete(user_id, contact_id).await? {
        Ok(Json(json!({ "message": "Contact deleted" })))
    } else {
        Err(ApiError::NotFound("Contact not found".to_string()))
    }
}
