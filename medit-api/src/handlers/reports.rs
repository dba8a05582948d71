use crate::app::AppState;
use crate::auth::AuthenticatedUser;
use crate::error::ApiError;
use crate::handlers::conversations::load_owned_conversation;
use crate::models::conversation::ConversationMessage;
use crate::models::report::{ConversationReport, CreateReportRequest};
use crate::repositories::report::NewReport;
use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    Json,
};
use medit_assistant::knowledge;
use serde_json::{json, Value};
use uuid::Uuid;

/// Analyze a conversation and persist the resulting health report.
pub async fn create_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<Uuid>,
    Json(payload): Json<CreateReportRequest>,
) -> Result<(StatusCode, Json<ConversationReport>), ApiError> {
    let conversation = load_owned_conversation(&state, &auth, conversation_id).await?;
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let messages = state.conversations.list_messages(conversation.id).await?;

    // The analyzer only sees what the user said; the full transcript goes to
    // the report writer.
    let user_text = user_side_text(&messages);
    let analysis = state.assistant.analyze_conversation(&user_text).await;

    // Register any previously unseen diseases and embed their ids alongside
    // the probabilities.
    let mut diseases_with_ids = Vec::new();
    for disease in &analysis.diseases {
        let stored = state
            .diseases
            .find_or_create(&disease.name, &knowledge::disease_description(&disease.name))
            .await?;
        diseases_with_ids.push(json!({
            "id": stored.id,
            "name": disease.name,
            "probability": disease.probability
        }));
    }

    let draft = state
        .assistant
        .compose_report(
            &user.profile(),
            &transcript(&messages),
            &analysis,
            payload.pain_intensity,
        )
        .await;

    let title = conversation
        .title
        .as_deref()
        .map(|t| format!("Health report: {t}"))
        .unwrap_or_else(|| "Health Analysis Report".to_string());
    let summary = if analysis.symptoms.is_empty() {
        None
    } else {
        Some(analysis.symptoms.join(", "))
    };

    let report = state
        .reports
        .create(NewReport {
            conversation_id: conversation.id,
            title: &title,
            summary: summary.as_deref(),
            content: &draft.content,
            detected_symptoms: &analysis.symptoms,
            diseases_with_probabilities: Value::Array(diseases_with_ids),
            health_suggestions: &analysis.suggestions,
            severity_level: draft.severity.as_str(),
        })
        .await?;

    tracing::info!(
        "report {} created for conversation {} (severity: {})",
        report.id,
        conversation.id,
        report.severity_level
    );

    Ok((StatusCode::CREATED, Json(report)))
}

pub async fn list_conversation_reports(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(conversation_id): Path<Uuid>,
) -> Result<Json<Value>, ApiError> {
    let conversation = load_owned_conversation(&state, &auth, conversation_id).await?;
    let reports = state.reports.list_for_conversation(conversation.id).await?;
    Ok(Json(json!({ "reports": reports })))
}

pub async fn list_my_reports(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<Value>, ApiError> {
    let reports = state.reports.list_for_user(auth.user_id).await?;
    Ok(Json(json!({ "reports": reports })))
}

pub async fn get_report(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<ConversationReport>, ApiError> {
    let report = state
        .reports
        .find_by_id(report_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Report not found".to_string()))?;

    // Ownership flows through the conversation.
    load_owned_conversation(&state, &auth, report.conversation_id).await?;

    Ok(Json(report))
}

fn user_side_text(messages: &[ConversationMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.sender == "user")
        .map(|m| m.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

fn transcript(messages: &[ConversationMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            let speaker = if m.sender == "user" { "User" } else { "Assistant" };
            format!("{speaker}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn message(sender: &str, content: &str) -> ConversationMessage {
        ConversationMessage {
            id: Uuid::new_v4(),
            conversation_id: Uuid::new_v4(),
            sender: sender.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_side_text_filters_assistant() {
        let messages = vec![
            message("assistant", "Hello!"),
            message("user", "I have a headache."),
            message("assistant", "Since when?"),
            message("user", "Since yesterday."),
        ];
        assert_eq!(
            user_side_text(&messages),
            "I have a headache.\nSince yesterday."
        );
    }

    #[test]
    fn test_transcript_labels_speakers() {
        let messages = vec![
            message("assistant", "Hello!"),
            message("user", "Hi."),
        ];
        assert_eq!(transcript(&messages), "Assistant: Hello!\n\nUser: Hi.");
    }
}
