//! Error taxonomy for the request path.
//!
//! Every failure a handler can surface maps to exactly one variant, and
//! every variant maps to exactly one status code.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Input fails schema or enum constraints. Never reaches the store.
    #[error("{0}")]
    Validation(String),

    /// Due date string unparsable by all three strategies.
    #[error("Invalid due_date format. Expected YYYY-MM-DD or ISO format")]
    InvalidDueDate,

    /// No matching document, or a malformed identifier (same outward signal).
    #[error("Task not found")]
    NotFound,

    /// Unexpected failure from the persistence layer.
    #[error("store failure: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidDueDate => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
