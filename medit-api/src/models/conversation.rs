use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Message author. Stored as text in conversation_messages.sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageSender {
    User,
    Assistant,
}

impl MessageSender {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageSender::User => "user",
            MessageSender::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub sender: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateConversationRequest {
    pub title: Option<String>,
}

/// A new conversation is returned together with the assistant's greeting,
/// which is persisted as its first message.
#[derive(Debug, Serialize)]
pub struct CreateConversationResponse {
    pub conversation: Conversation,
    pub greeting: ConversationMessage,
}

#[derive(Debug, Serialize)]
pub struct ConversationDetailResponse {
    pub conversation: Conversation,
    pub messages: Vec<ConversationMessage>,
}

#[derive(Debug, Deserialize)]
pub struct PostMessageRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct PostMessageResponse {
    pub user_message: ConversationMessage,
    pub assistant_message: ConversationMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_sender_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageSender::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(MessageSender::User.as_str(), "user");
    }
}
