use crate::database::Database;
use crate::models::disease::Disease;
use anyhow::{Context, Result};
use uuid::Uuid;

#[derive(Clone)]
pub struct DiseaseRepository {
    db: Database,
}

impl DiseaseRepository {
    pub fn new(db: Database) -> Self {
        DiseaseRepository { db }
    }

    /// Register a disease the analyzer surfaced, or return the existing row.
    /// The no-op DO UPDATE keeps RETURNING populated on conflict.
    pub async fn find_or_create(&self, name: &str, description: &str) -> Result<Disease> {
        let disease = sqlx::query_as::<_, Disease>(
            r#"
            INSERT INTO diseases (name, description)
            VALUES ($1, $2)
            ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, description, created_at
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to find or create disease")?;

        Ok(disease)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Disease>> {
        let disease = sqlx::query_as::<_, Disease>(
            "SELECT id, name, description, created_at FROM diseases WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.db.get_pool())
        .await
        .context("Failed to find disease")?;

        Ok(disease)
    }

    pub async fn list(&self) -> Result<Vec<Disease>> {
        let diseases = sqlx::query_as::<_, Disease>(
            "SELECT id, name, description, created_at FROM diseases ORDER BY name",
        )
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list diseases")?;

        Ok(diseases)
    }
}
