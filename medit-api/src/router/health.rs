use crate::app::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Liveness plus a database round-trip. Unreachable storage reports 503.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database_ok = state.db.ping().await.unwrap_or(false);

    let status = if database_ok { "healthy" } else { "unhealthy" };
    let status_code = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "database": database_ok,
            "llm_provider": state.assistant.provider_name(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        })),
    )
}
