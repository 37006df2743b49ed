use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use services::participant_service::ParticipantService;
use util::state::AppState;

use crate::response::{Message, service_error};

/// DELETE `/api/admin/participants/{participant_id}`
///
/// Strict delete: a second call on the same id is a 404, not a silent no-op.
pub async fn remove_participant(
    State(state): State<AppState>,
    Path(participant_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Message>)> {
    ParticipantService::remove(state.db(), participant_id)
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(service_error)
}
