use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
};
use std::collections::BTreeMap;

use services::checkin_flow::ParticipantSearchItem;
use services::participant_service::{ParticipantService, SEARCH_LIMIT_DEFAULT};
use services::roster_csv;
use util::state::AppState;

use super::common::{ParticipantResponse, SearchQuery};
use crate::response::{Message, service_error};

/// GET `/api/participants/search?q=&limit=`
///
/// Public masked search. Blank queries return `[]` without touching the
/// database.
pub async fn search_participants(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<ParticipantSearchItem>>, (StatusCode, Json<Message>)> {
    let q = query.q.unwrap_or_default();
    let limit = query.limit.unwrap_or(SEARCH_LIMIT_DEFAULT);
    ParticipantService::search(state.db(), &q, limit)
        .await
        .map(Json)
        .map_err(service_error)
}

/// GET `/api/admin/participants`
pub async fn list_participants(
    State(state): State<AppState>,
) -> Result<Json<Vec<ParticipantResponse>>, (StatusCode, Json<Message>)> {
    ParticipantService::list(state.db())
        .await
        .map(|rows| Json(rows.into_iter().map(ParticipantResponse::from).collect()))
        .map_err(service_error)
}

/// GET `/api/admin/participants/count`
pub async fn count_participants(
    State(state): State<AppState>,
) -> Result<Json<u64>, (StatusCode, Json<Message>)> {
    ParticipantService::count(state.db())
        .await
        .map(Json)
        .map_err(service_error)
}

/// GET `/api/admin/participants/stats/by-district`
pub async fn stats_by_district(
    State(state): State<AppState>,
) -> Result<Json<BTreeMap<String, i64>>, (StatusCode, Json<Message>)> {
    ParticipantService::stats_by_district(state.db())
        .await
        .map(Json)
        .map_err(service_error)
}

/// GET `/api/admin/participants/template`
///
/// CSV template matching the import column layout.
pub async fn download_template() -> (StatusCode, (HeaderMap, String)) {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_static("attachment; filename=\"participants_template.csv\""),
    );
    (StatusCode::OK, (headers, roster_csv::template()))
}
