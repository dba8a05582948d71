use crate::database::Database;
use crate::models::report::ConversationReport;
use anyhow::{Context, Result};
use uuid::Uuid;

const REPORT_COLUMNS: &str = "id, conversation_id, title, summary, content, detected_symptoms, \
     diseases_with_probabilities, health_suggestions, severity_level, created_at";

pub struct NewReport<'a> {
    pub conversation_id: Uuid,
    pub title: &'a str,
    pub summary: Option<&'a str>,
    pub content: &'a str,
    pub detected_symptoms: &'a [String],
    pub diseases_with_probabilities: serde_json::Value,
    pub health_suggestions: &'a [String],
    pub severity_level: &'a str,
}

#[derive(Clone)]
pub struct ReportRepository {
    db: Database,
}

impl ReportRepository {
    pub fn new(db: Database) -> Self {
        ReportRepository { db }
    }

    pub async fn create(&self, report: NewReport<'_>) -> Result<ConversationReport> {
        let stored = sqlx::query_as::<_, ConversationReport>(&format!(
            r#"
            INSERT INTO conversation_reports
                (conversation_id, title, summary, content, detected_symptoms,
                 diseases_with_probabilities, health_suggestions, severity_level)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {REPORT_COLUMNS}
            "#,
        ))
        .bind(report.conversation_id)
        .bind(report.title)
        .bind(report.summary)
        .bind(report.content)
        .bind(report.detected_symptoms)
        .bind(report.diseases_with_probabilities)
        .bind(report.health_suggestions)
        .bind(report.severity_level)
        .fetch_one(self.db.get_pool())
        .await
        .context("Failed to create conversation report")?;

        Ok(stored)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ConversationReport>> {
        let report = sqlx::query_as::<_, ConversationReport>(&format!(
            "SELECT {REPORT_COLUMNS} FROM conversation_reports WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.db.get_pool())
        .await
        .context("Failed to find report")?;

        Ok(report)
    }

    pub async fn list_for_conversation(
        &self,
        conversation_id: Uuid,
    ) -> Result<Vec<ConversationReport>> {
        let reports = sqlx::query_as::<_, ConversationReport>(&format!(
            r#"
            SELECT {REPORT_COLUMNS}
            FROM conversation_reports
            WHERE conversation_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(conversation_id)
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list reports for conversation")?;

        Ok(reports)
    }

    /// Every report across the user's conversations, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<ConversationReport>> {
        let reports = sqlx::query_as::<_, ConversationReport>(
            r#"
            SELECT r.id, r.conversation_id, r.title, r.summary, r.content, r.detected_symptoms,
                   r.diseases_with_probabilities, r.health_suggestions, r.severity_level, r.created_at
            FROM conversation_reports r
            JOIN conversations c ON c.id = r.conversation_id
            WHERE c.user_id = $1
            ORDER BY r.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.get_pool())
        .await
        .context("Failed to list reports for user")?;

        Ok(reports)
    }
}
