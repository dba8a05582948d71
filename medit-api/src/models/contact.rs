use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UserContact {
    pub id: Uuid,
    pub user_id: Uuid,
    pub contact_user_id: Uuid,
    pub alias_nickname: Option<String>,
    pub relation: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Contacts are referenced by login id so the client never has to know
/// internal user ids up front.
#[derive(Debug, Deserialize)]
pub struct CreateContactRequest {
    pub contact_login_id: String,
    pub alias_nickname: Option<String>,
    pub relation: Option<String>,
}

/// Contact row joined with the referenced user's public identity.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ContactResponse {
    pub id: Uuid,
    pub contact_user_id: Uuid,
    pub contact_login_id: String,
    pub contact_nickname: String,
    pub alias_nickname: Option<String>,
    pub relation: Option<String>,
    pub created_at: DateTime<Utc>,
}
