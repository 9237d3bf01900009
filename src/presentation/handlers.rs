// HTTP request handlers
use crate::domain::sensor::{SensorSubmission, StoredReading};
use crate::domain::snapshot::Snapshot;
use crate::infrastructure::http_response::ApiError;
use crate::presentation::app_state::AppState;
use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::{Value, json};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Live snapshot from every source
pub async fn air_quality(State(state): State<Arc<AppState>>) -> Result<Json<Snapshot>, ApiError> {
    let snapshot = state.air_quality_service.snapshot().await?;
    Ok(Json(snapshot))
}

/// Recent sensor rows, oldest first
pub async fn history(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoredReading>>, ApiError> {
    let rows = state.air_quality_service.history().await?;
    Ok(Json(rows))
}

/// Accept one reading from the hardware sensor
pub async fn submit_sensor(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(body) = body.map_err(|e| ApiError::InvalidPayload(e.body_text()))?;
    let submission = SensorSubmission::from_json(&body)?;

    state.air_quality_service.submit(&submission).await?;
    Ok(Json(json!({ "success": true })))
}

pub async fn mock_air_quality(State(state): State<Arc<AppState>>) -> Json<Snapshot> {
    Json(state.mock_service.snapshot())
}

pub async fn mock_history(State(state): State<Arc<AppState>>) -> Json<Vec<StoredReading>> {
    Json(state.mock_service.history())
}
