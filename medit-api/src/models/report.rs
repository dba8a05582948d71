use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ConversationReport {
    pub id: Uuid,
    pub conversation_id: Uuid,
    pub title: String,
    pub summary: Option<String>,
    pub content: String,
    pub detected_symptoms: Vec<String>,
    /// `[{"id": ..., "name": ..., "probability": ...}, ...]`
    pub diseases_with_probabilities: serde_json::Value,
    pub health_suggestions: Vec<String>,
    pub severity_level: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Default)]
pub struct CreateReportRequest {
    /// Self-reported pain on a 0-10 scale; overrides the model's severity.
    pub pain_intensity: Option<f64>,
}
