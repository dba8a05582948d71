use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub nickname: String,
    pub relation: String,
    pub age: Option<i32>,
    pub usual_illness: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateFamilyMemberRequest {
    pub nickname: String,
    pub relation: String,
    pub age: Option<i32>,
    #[serde(default)]
    pub usual_illness: Vec<String>,
}
