use crate::database::Database;
use crate::models::user::{CreateUserRequest, UpdateUserRequest, User};
use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use uuid::Uuid;

const USER_COLUMNS: &str = "id, login_id, nickname, gender, age_range, usual_illness, \
     password_hash, is_active, created_at, updated_at, last_login_at";

#[derive(Clone)]
pub struct UserRepository {
    db: Database,
}

impl UserRepository {
    pub fn new(db: Database) -> Self {
        UserRepository { db }
    }

    pub async fn create(&self, request: &CreateUserRequest) -> Result<User> {
        let password_hash = hash_password(&request.password)?;

        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (login_id, nickname, gender, age_range, usual_illness, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(&request.login_id)
        .bind(&request.nickname)
        .bind(request.gender.as_deref())
        .bind(request.age_range.as_deref())
        .bind(&request.usual_illness)
        .bind(password_hash)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to create user")?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.db.get_pool())
        .await
        .context("Failed to find user by ID")?;

        Ok(user)
    }

    pub async fn find_by_login_id(&self, login_id: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE login_id = $1"
        ))
        .bind(login_id)
        .fetch_optional(self.db.get_pool())
        .await
        .context("Failed to find user by login ID")?;

        Ok(user)
    }

    pub async fn list(&self, limit: i64, offset: i64) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list users")?;

        Ok(users)
    }

    pub async fn update(&self, id: Uuid, updates: &UpdateUserRequest) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET
                nickname = COALESCE($2, nickname),
                gender = COALESCE($3, gender),
                age_range = COALESCE($4, age_range),
                usual_illness = COALESCE($5, usual_illness),
                is_active = COALESCE($6, is_active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(updates.nickname.as_deref())
        .bind(updates.gender.as_deref())
        .bind(updates.age_range.as_deref())
        .bind(updates.usual_illness.as_deref())
        .bind(updates.is_active)
        .fetch_optional(self.db.get_pool())
        .await
        .context("Failed to update user")?;

        Ok(user)
    }

    pub async fn update_last_login(&self, id: Uuid) -> Result<()> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(self.db.get_pool())
            .await
            .context("Failed to update last login")?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(self.db.get_pool())
            .await
            .context("Failed to delete user")?;

        Ok(result.rows_affected() > 0)
    }

    /// Look the user up by login id and check the password. Returns None for
    /// both unknown users and wrong passwords so callers cannot tell the two
    /// apart.
    pub async fn verify_password(&self, login_id: &str, password: &str) -> Result<Option<User>> {
        let user = self.find_by_login_id(login_id).await?;

        if let Some(user) = &user {
            if verify_password_hash(password, &user.password_hash)? {
                return Ok(Some(user.clone()));
            }
        }

        Ok(None)
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?
        .to_string();

    Ok(password_hash)
}

fn verify_password_hash(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;

    let argon2 = Argon2::default();

    Ok(argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse battery staple").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password_hash("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password_hash("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_verify_rejects_garbage_hash() {
        assert!(verify_password_hash("anything", "not-a-phc-string").is_err());
    }
}
