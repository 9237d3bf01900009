// HTTP response utilities for JSON error bodies
use crate::application::reading_store::StoreError;
use crate::domain::sensor::SubmissionError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<SubmissionError> for ApiError {
    fn from(e: SubmissionError) -> Self {
        ApiError::InvalidPayload(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::InvalidPayload(reason) => {
                tracing::debug!("Rejected sensor payload: {}", reason);
                json_error(StatusCode::BAD_REQUEST, "Invalid payload")
            }
            ApiError::Store(e) => {
                tracing::error!("Store error: {}", e);
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

/// `{"error": message}` with the given status
pub fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
