use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{Duration, Local};

use services::attendance_service::AttendanceService;
use util::{config::AppConfig, state::AppState};

use super::common::CleanupRunQuery;
use crate::response::DeleteOutcome;

/// POST `/api/admin/attendances/cleanup/run?days=`
///
/// Manual retention sweep; `days` falls back to the configured retention.
pub async fn run_cleanup(
    State(state): State<AppState>,
    Query(query): Query<CleanupRunQuery>,
) -> Json<DeleteOutcome> {
    let days = query
        .days
        .unwrap_or_else(|| AppConfig::global().attendance_retention_days);
    if days <= 0 {
        return Json(DeleteOutcome {
            success: false,
            deleted: 0,
            message: "자동 삭제가 비활성화되어 있습니다 (영구 보관)".to_string(),
        });
    }

    let cutoff = (Local::now() - Duration::days(days))
        .format("%Y-%m-%d %H:%M")
        .to_string();

    match AttendanceService::delete_older_than(state.db(), &cutoff).await {
        Ok(deleted) => Json(DeleteOutcome {
            success: true,
            deleted,
            message: format!("{days}일 이전 출석 기록 {deleted}건이 삭제되었습니다."),
        }),
        Err(e) => {
            tracing::error!(error = %e, "attendance cleanup failed");
            Json(DeleteOutcome {
                success: false,
                deleted: 0,
                message: "삭제 처리 중 오류가 발생했습니다.".to_string(),
            })
        }
    }
}
