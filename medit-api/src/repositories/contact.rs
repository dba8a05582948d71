use crate::database::Database;
use crate::models::contact::{ContactResponse, UserContact};
use anyhow::{Context, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct ContactRepository {
    db: Database,
}

impl ContactRepository {
    pub fn new(db: Database) -> Self {
        ContactRepository { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        contact_user_id: Uuid,
        alias_nickname: Option<&str>,
        relation: Option<&str>,
    ) -> Result<UserContact> {
        let contact = sqlx::query_as::<_, UserContact>(
            r#"
            INSERT INTO user_contacts (user_id, contact_user_id, alias_nickname, relation)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, contact_user_id, alias_nickname, relation, created_at
            "#,
        )
        .bind(user_id)
        .bind(contact_user_id)
        .bind(alias_nickname)
        .bind(relation)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to create contact")?;

        Ok(contact)
    }

    /// Contacts joined with the referenced user's public identity.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ContactResponse>> {
        let contacts = sqlx::query_as::<_, ContactResponse>(
            r#"
            SELECT c.id, c.contact_user_id, u.login_id AS contact_login_id,
                   u.nickname AS contact_nickname, c.alias_nickname, c.relation, c.created_at
            FROM user_contacts c
            JOIN users u ON u.id = c.contact_user_id
            WHERE c.user_id = $1
            ORDER BY c.created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list contacts")?;

        Ok(contacts)
    }

    pub async fn exists(&self, user_id: Uuid, contact_user_id: Uuid) -> Result<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM user_contacts WHERE user_id = $1 AND contact_user_id = $2",
        )
        .bind(user_id)
        .bind(contact_user_id)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to check contact existence")?;

        Ok(count > 0)
    }

    pub async fn delete(&self, user_id: Uuid, contact_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM user_contacts WHERE id = $1 AND user_id = $2")
            .bind(contact_id)
            .bind(user_id)
            .execute(self.db.get_pool())
            .await
            .context("Failed to delete contact")?;

        Ok(result.rows_affected() > 0)
    }
}
