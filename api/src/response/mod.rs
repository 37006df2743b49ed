//! Shared JSON response bodies.
//!
//! Success payloads use the raw shapes the check-in client expects (plain
//! arrays and objects). Failures carry a `{ "message": ... }` body — the
//! check-in flow extracts that field to render a reason, so every error
//! response must provide it.

use axum::{Json, http::StatusCode};
use serde::Serialize;
use services::error::ServiceError;

/// Error body: `{ "message": "..." }`.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result body of the destructive attendance deletes.
#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub deleted: u64,
    pub message: String,
}

/// Maps a service failure onto a status code and a `{message}` body.
///
/// Database errors are logged and reported with a generic message; the other
/// variants carry user-facing text already.
pub fn service_error(err: ServiceError) -> (StatusCode, Json<Message>) {
    let status = match &err {
        ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::Db(e) => {
            tracing::error!(error = %e, "database error");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Message::new("서버 오류가 발생했습니다.")),
            );
        }
    };
    (status, Json(Message::new(err.to_string())))
}
