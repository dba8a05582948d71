use crate::database::Database;
use crate::models::conversation::{Conversation, ConversationMessage, MessageSender};
use anyhow::{Context, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct ConversationRepository {
    db: Database,
}

impl ConversationRepository {
    pub fn new(db: Database) -> Self {
        ConversationRepository { db }
    }

    pub async fn create(&self, user_id: Uuid, title: Option<&str>) -> Result<Conversation> {
        let conversation = sqlx::query_as::<_, Conversation>(
            r#"
            INSERT INTO conversations (user_id, title)
            VALUES ($1, $2)
            RETURNING id, user_id, title, created_at
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to create conversation")?;

        Ok(conversation)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Conversation>> {
        let conversation = sqlx::query_as::<_, Conversation>(
            "SELECT id, user_id, title, created_at FROM conversations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.get_pool())
        .await
        .context("Failed to find conversation")?;

        Ok(conversation)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Conversation>> {
        let conversations = sqlx::query_as::<_, Conversation>(
            r#"
            SELECT id, user_id, title, created_at
            FROM conversations
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list conversations")?;

        Ok(conversations)
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1")
            .bind(id)
            .execute(self.db.get_pool())
            .await
            .context("Failed to delete conversation")?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn add_message(
        &self,
        conversation_id: Uuid,
        sender: MessageSender,
        content: &str,
    ) -> Result<ConversationMessage> {
        let message = sqlx::query_as::<_, ConversationMessage>(
            r#"
            INSERT INTO conversation_messages (conversation_id, sender, content)
            VALUES ($1, $2, $3)
            RETURNING id, conversation_id, sender, content, created_at
            "#,
        )
        .bind(conversation_id)
        .bind(sender.as_str())
        .bind(content)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to add conversation message")?;

        Ok(message)
    }

    /// Messages in chronological order.
    pub async fn list_messages(&self, conversation_id: Uuid) -> Result<Vec<ConversationMessage>> {
        let messages = sqlx::query_as::<_, ConversationMessage>(
            r#"
            SELECT id, conversation_id, sender, content, created_at
            FROM conversation_messages
            WHERE conversation_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(conversation_id)
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list conversation messages")?;

        Ok(messages)
    }
}
