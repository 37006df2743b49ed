use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use services::session_service::{CreateSession, SessionService};
use util::state::AppState;

use super::common::{CreateSessionPayload, SessionResponse};
use crate::response::{Message, service_error};

/// POST `/api/admin/sessions`
pub async fn create_session(
    State(state): State<AppState>,
    Json(payload): Json<CreateSessionPayload>,
) -> Result<(StatusCode, Json<SessionResponse>), (StatusCode, Json<Message>)> {
    let created = SessionService::create(
        state.db(),
        CreateSession {
            title: payload.title,
            session_date: payload.session_date,
        },
    )
    .await
    .map_err(service_error)?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(created))))
}

/// POST `/api/admin/sessions/{session_id}/close`
///
/// One-way ACTIVE → CLOSED transition.
pub async fn close_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Message>)> {
    SessionService::close(state.db(), &session_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(service_error)
}
