use crate::database::Database;
use crate::models::family::{CreateFamilyMemberRequest, FamilyMember};
use anyhow::{Context, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct FamilyRepository {
    db: Database,
}

impl FamilyRepository {
    pub fn new(db: Database) -> Self {
        FamilyRepository { db }
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        request: &CreateFamilyMemberRequest,
    ) -> Result<FamilyMember> {
        let member = sqlx::query_as::<_, FamilyMember>(
            r#"
            INSERT INTO family_members (user_id, nickname, relation, age, usual_illness)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, nickname, relation, age, usual_illness, created_at
            "#,
        )
        .bind(user_id)
        .bind(&request.nickname)
        .bind(&request.relation)
        .bind(request.age)
        .bind(&request.usual_illness)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to create family member")?;

        Ok(member)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FamilyMember>> {
        let members = sqlx::query_as::<_, FamilyMember>(
            r#"
            SELECT id, user_id, nickname, relation, age, usual_illness, created_at
            FROM family_members
            WHERE user_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list family members")?;

        Ok(members)
    }

    pub async fn delete(&self, user_id: Uuid, member_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM family_members WHERE id = $1 AND user_id = $2")
            .bind(member_id)
            .bind(user_id)
            .execute(self.db.get_pool())
            .await
            .context("Failed to delete family member")?;

        Ok(result.rows_affected() > 0)
    }
}
