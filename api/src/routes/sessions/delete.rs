use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use services::session_service::SessionService;
use util::state::AppState;

use crate::response::{Message, service_error};

/// DELETE `/api/admin/sessions/{session_id}`
pub async fn remove_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, (StatusCode, Json<Message>)> {
    SessionService::remove(state.db(), &session_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(service_error)
}
