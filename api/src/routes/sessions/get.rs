use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use services::session_service::SessionService;
use util::state::AppState;

use super::common::{SessionPublicResponse, SessionQrResponse, SessionResponse};
use crate::response::{Message, service_error};

/// GET `/api/admin/sessions`
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionResponse>>, (StatusCode, Json<Message>)> {
    SessionService::list(state.db())
        .await
        .map(|rows| Json(rows.into_iter().map(SessionResponse::from).collect()))
        .map_err(service_error)
}

/// GET `/api/admin/sessions/{session_id}`
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, (StatusCode, Json<Message>)> {
    match SessionService::get(state.db(), &session_id).await {
        Ok(Some(session)) => Ok(Json(SessionResponse::from(session))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(Message::new("세션을 찾을 수 없습니다.")),
        )),
        Err(e) => Err(service_error(e)),
    }
}

/// GET `/api/admin/sessions/{session_id}/qr`
///
/// The scannable payload: includes the submission token.
pub async fn get_session_qr(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionQrResponse>, (StatusCode, Json<Message>)> {
    match SessionService::get(state.db(), &session_id).await {
        Ok(Some(session)) => Ok(Json(SessionQrResponse::from(session))),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(Message::new("세션을 찾을 수 없습니다.")),
        )),
        Err(e) => Err(service_error(e)),
    }
}

/// GET `/api/sessions/code/{short_code}`
///
/// Unauthenticated lookup used by the short-link check-in page. The response
/// never contains the session token.
pub async fn get_session_by_code(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<SessionPublicResponse>, (StatusCode, Json<Message>)> {
    SessionService::get_public_by_code(state.db(), &short_code)
        .await
        .map(|s| Json(SessionPublicResponse::from(s)))
        .map_err(service_error)
}
