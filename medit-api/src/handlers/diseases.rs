use crate::app::AppState;
use crate::error::ApiError;
use crate::models::disease::Disease;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

pub async fn list_diseases(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let diseases = state.diseases.list().await?;
    Ok(Json(json!({ "diseases": diseases })))
}

pub async fn get_disease(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Disease>, ApiError> {
    let disease = state
        .diseases
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Disease not found".to_string()))?;
    Ok(Json(disease))
}
