use chrono::{DateTime, Utc};
use medit_assistant::UserProfile;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub login_id: String,
    pub nickname: String,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub usual_illness: Vec<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Profile slice the assistant prompts work from.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            nickname: Some(self.nickname.clone()),
            gender: self.gender.clone(),
            age_range: self.age_range.clone(),
            usual_illness: self.usual_illness.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub login_id: String,
    pub nickname: String,
    pub password: String,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    #[serde(default)]
    pub usual_illness: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub nickname: Option<String>,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub usual_illness: Option<Vec<String>>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub login_id: String,
    pub nickname: String,
    pub gender: Option<String>,
    pub age_range: Option<String>,
    pub usual_illness: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            login_id: user.login_id,
            nickname: user.nickname,
            gender: user.gender,
            age_range: user.age_range,
            usual_illness: user.usual_illness,
            is_active: user.is_active,
            created_at: user.created_at,
            last_login_at: user.last_login_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: Uuid::new_v4(),
            login_id: "kim123".to_string(),
            nickname: "Kim".to_string(),
            gender: Some("male".to_string()),
            age_range: Some("38".to_string()),
            usual_illness: vec!["hypertension".to_string()],
            password_hash: "argon2-hash".to_string(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            last_login_at: None,
        }
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let serialized = serde_json::to_string(&sample_user()).unwrap();
        assert!(!serialized.contains("password_hash"));
        assert!(!serialized.contains("argon2-hash"));
    }

    #[test]
    fn test_user_response_from_user() {
        let user = sample_user();
        let id = user.id;
        let response = UserResponse::from(user);
        assert_eq!(response.id, id);
        assert_eq!(response.login_id, "kim123");
        let serialized = serde_json::to_string(&response).unwrap();
        assert!(!serialized.contains("argon2-hash"));
    }

    #[test]
    fn test_profile_slice() {
        let profile = sample_user().profile();
        assert_eq!(profile.nickname.as_deref(), Some("Kim"));
        assert_eq!(profile.usual_illness, vec!["hypertension"]);
    }

    #[test]
    fn test_create_request_defaults_usual_illness() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"login_id": "lee789", "nickname": "Lee", "password": "secret"}"#,
        )
        .unwrap();
        assert!(request.usual_illness.is_empty());
        assert!(request.gender.is_none());
    }
}
