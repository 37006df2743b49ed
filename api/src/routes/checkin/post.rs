use axum::{
    Json,
    extract::{ConnectInfo, State},
    http::{HeaderMap, StatusCode, header},
};
use std::net::SocketAddr;

use services::attendance_service::AttendanceService;
use services::checkin_flow::{CheckinRequest, CheckinResult};
use util::state::AppState;

/// POST `/api/checkin`
///
/// Public check-in submission. Business failures (closed session, wrong
/// phone, duplicate check-in, ...) come back as `200 { ok: false, message }`;
/// only infrastructure faults produce a non-2xx status, and even those carry
/// a renderable message.
pub async fn submit_checkin(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(req): Json<CheckinRequest>,
) -> (StatusCode, Json<CheckinResult>) {
    let ip = addr.ip().to_string();
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok());

    match AttendanceService::checkin(state.db(), &req, Some(&ip), user_agent).await {
        Ok(result) => (StatusCode::OK, Json(result)),
        Err(e) => {
            tracing::error!(error = %e, "check-in failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(CheckinResult::failure("처리 중 오류가 발생했습니다.")),
            )
        }
    }
}
