use axum::{
    Json,
    extract::{Query, State},
};

use services::attendance_service::AttendanceService;
use services::error::ServiceError;
use util::state::AppState;

use super::common::DeleteQuery;
use crate::response::DeleteOutcome;

/// DELETE `/api/admin/attendances?sessionId=` or `?startDate=&endDate=`
///
/// Irreversible; the client confirms before dispatching. Always answers with
/// a uniform `{success, deleted, message}` body so the caller renders one
/// shape for every outcome. The date range is inclusive on both ends; the
/// half-open shift happens inside the service.
pub async fn delete_attendances(
    State(state): State<AppState>,
    Query(query): Query<DeleteQuery>,
) -> Json<DeleteOutcome> {
    let outcome = match (&query.session_id, &query.start_date, &query.end_date) {
        (Some(session_id), _, _) if !session_id.trim().is_empty() => {
            AttendanceService::delete_by_session(state.db(), session_id)
                .await
                .map(|deleted| DeleteOutcome {
                    success: true,
                    deleted,
                    message: format!("세션의 출석 기록 {deleted}건이 삭제되었습니다."),
                })
        }
        (_, Some(start), Some(end)) => {
            AttendanceService::delete_by_date_range(state.db(), start, end)
                .await
                .map(|deleted| DeleteOutcome {
                    success: true,
                    deleted,
                    message: format!("{start} ~ {end} 기간의 출석 기록 {deleted}건이 삭제되었습니다."),
                })
        }
        _ => {
            return Json(DeleteOutcome {
                success: false,
                deleted: 0,
                message: "삭제 조건을 지정해주세요 (sessionId 또는 startDate/endDate)".to_string(),
            });
        }
    };

    Json(match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            let message = match &e {
                ServiceError::Db(err) => {
                    tracing::error!(error = %err, "attendance delete failed");
                    "삭제 처리 중 오류가 발생했습니다.".to_string()
                }
                other => other.to_string(),
            };
            DeleteOutcome {
                success: false,
                deleted: 0,
                message,
            }
        }
    })
}
