use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use chrono::Local;
use serde_json::{Value, json};

use services::attendance_service::{AttendanceItem, AttendanceService};
use services::district_stats::DistrictGroup;
use util::{config::AppConfig, state::AppState};

use super::common::{CountQuery, ListQuery};
use crate::response::{Message, service_error};

/// GET `/api/admin/attendances[?sessionId=]`
///
/// Newest first, with each member's current district joined in.
pub async fn list_attendances(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<AttendanceItem>>, (StatusCode, Json<Message>)> {
    AttendanceService::list(state.db(), query.session_id.as_deref())
        .await
        .map(Json)
        .map_err(service_error)
}

/// GET `/api/admin/attendances/count?sessionId=`
pub async fn count_attendances(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
) -> Result<Json<u64>, (StatusCode, Json<Message>)> {
    AttendanceService::count_for_session(state.db(), &query.session_id)
        .await
        .map(Json)
        .map_err(service_error)
}

/// GET `/api/admin/attendances/stats/by-district[?sessionId=]`
///
/// District report: per-district totals, attended counts and annotated member
/// lists, optionally narrowed to one session.
pub async fn stats_by_district(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<DistrictGroup>>, (StatusCode, Json<Message>)> {
    AttendanceService::district_report(state.db(), query.session_id.as_deref())
        .await
        .map(Json)
        .map_err(service_error)
}

/// GET `/api/admin/attendances/export.csv[?sessionId=]`
pub async fn export_attendances_csv(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<(HeaderMap, String), (StatusCode, Json<Message>)> {
    let records = AttendanceService::list(state.db(), query.session_id.as_deref())
        .await
        .map_err(service_error)?;

    let mut csv = String::from("이름,전화번호,구역,출석 시간,세션\n");

    fn esc(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    for r in records {
        let row = format!(
            "{},{},{},{},{}\n",
            esc(&r.name),
            esc(&r.phone),
            esc(&r.district),
            esc(&r.checked_in_at),
            esc(&r.session_title)
        );
        csv.push_str(&row);
    }

    let filename = format!("attendances_{}.csv", Local::now().format("%Y-%m-%d"));

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", filename))
            .unwrap_or(HeaderValue::from_static("attachment")),
    );

    Ok((headers, csv))
}

/// GET `/api/admin/attendances/cleanup/status`
pub async fn cleanup_status() -> Json<Value> {
    let days = AppConfig::global().attendance_retention_days;
    Json(json!({
        "enabled": days > 0,
        "retentionDays": days,
        "message": if days > 0 {
            format!("{days}일 이후 출석 기록이 자동 삭제됩니다")
        } else {
            "자동 삭제가 비활성화되어 있습니다 (영구 보관)".to_string()
        },
    }))
}
