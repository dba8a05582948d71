use anyhow::Result;
use medit_core::config::model::DatabaseSettings;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub async fn new(settings: &DatabaseSettings) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(settings.acquire_timeout_seconds))
            .connect(&settings.url)
            .await?;

        Ok(Database { pool })
    }

    pub fn get_pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Drop everything and run the migrations again. Development and demo
    /// seeding only.
    pub async fn reset_schema(&self) -> Result<()> {
        sqlx::query("DROP SCHEMA public CASCADE")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE SCHEMA public")
            .execute(&self.pool)
            .await?;
        self.run_migrations().await
    }

    pub async fn ping(&self) -> Result<bool> {
        let result: i32 = sqlx::query_scalar("SELECT 1").fetch_one(&self.pool).await?;
        Ok(result == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore]
    async fn test_database_connection() {
        let settings = DatabaseSettings {
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/medit_test".to_string()),
            ..Default::default()
        };
        let db = Database::new(&settings).await.unwrap();
        assert!(db.ping().await.unwrap());
    }
}
