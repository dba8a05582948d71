use crate::app::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::models::conversation::{
    Conversation, ConversationDetailResponse, CreateConversationRequest,
    CreateConversationResponse, MessageSender, PostMessageRequest, PostMessageResponse,
};
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

/// Load a conversation and make sure it belongs to the caller. Foreign
/// conversations read as absent so ids cannot be probed.
pub(crate) async fn load_owned_conversation(
    state: &AppState,
    auth: &AuthenticatedUser,
    conversation_id: Uuid,
) -> Result<Conversation, ApiError> {
    let conversation = state
        .conversations
        .find_by_id(conversation_id)
        .await?
        .filter(|c| c.user_id == auth.user_id)
        .ok_or_else(|| ApiError::NotFound("Conversation not found".to_string()))?;
    Ok(conversation)
}

pub async fn create_conversation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateConversationRequest>,
) -> Result<(StatusCode, Json<CreateConversationResponse>), ApiError> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let conversation = state
        .conversations
        .create(user.id, payload.title.as_deref())
        .await?;

    // The assistant opens every conversation with a personalized greeting.
    let greeting_text = state.assistant.greet(&user.profile()).await;
    let greeting = state
        .conversations
        .add_message(conversation.id, MessageSender::Assistant, &greeting_text)
        .await?;

    tracing::info!("conversation {} opened for {}", conversation.id, user.login_id);

    Ok((
        StatusCode::CREATED,
        Json(CreateConversationResponse {
            conversation,
            greeting,
        }),
    ))
}

pub async fn list_conversations(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Value>, ApiError> {
    let conversations = state.conversations.list_for_user(auth.user_id).await?;
    Ok(Json(json!({ "conversations": conversations })))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<ConversationDetailResponse>, ApiError> {
    let conversation = load_owned_conversation(&state, &auth, conversation_id).await?;
    let messages = state.conversations.list_messages(conversation.id).await?;

    Ok(Json(ConversationDetailResponse {
        conversation,
        messages,
    }))
}

pub async fn delete_conversation(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conversation = load_owned_conversation(&state, &auth, conversation_id).await?;
    state.conversations.delete(conversation.id).await?;
    Ok(Json(json!({ "message": "Conversation deleted" })))
}

pub async fn post_message(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<Uuid>,
    Json(payload): Json<PostMessageRequest>,
) -> Result<(StatusCode, Json<PostMessageResponse>), ApiError> {
    if payload.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Message content must not be empty".to_string(),
        ));
    }

    let conversation = load_owned_conversation(&state, &auth, conversation_id).await?;

    let user_message = state
        .conversations
        .add_message(conversation.id, MessageSender::User, &payload.content)
        .await?;

    let reply = state.assistant.reply(&payload.content).await;
    let assistant_message = state
        .conversations
        .add_message(conversation.id, MessageSender::Assistant, &reply)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(PostMessageResponse {
            user_message,
            assistant_message,
        }),
    ))
}
