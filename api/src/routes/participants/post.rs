use axum::{
    Json,
    extract::{Multipart, Query, State},
    http::StatusCode,
};

use services::participant_service::{CreateParticipant, ImportSummary, ParticipantService};
use services::roster_csv;
use util::state::AppState;

use super::common::{CreateParticipantPayload, ImportQuery, ParticipantResponse};
use crate::response::{Message, service_error};

/// POST `/api/admin/participants`
pub async fn add_participant(
    State(state): State<AppState>,
    Json(payload): Json<CreateParticipantPayload>,
) -> Result<(StatusCode, Json<ParticipantResponse>), (StatusCode, Json<Message>)> {
    let created = ParticipantService::add(
        state.db(),
        CreateParticipant {
            name: payload.name,
            phone: payload.phone,
            baptismal_name: payload.baptismal_name,
            district: payload.district,
        },
    )
    .await
    .map_err(service_error)?;

    Ok((StatusCode::CREATED, Json(ParticipantResponse::from(created))))
}

/// POST `/api/admin/participants/import?replaceAll=`
///
/// Multipart CSV roster import. `replaceAll=true` wipes the existing roster
/// before inserting — destructive, so the client confirms before calling.
pub async fn import_roster(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    mut multipart: Multipart,
) -> Result<Json<ImportSummary>, (StatusCode, Json<Message>)> {
    let mut file_text: Option<String> = None;
    while let Some(field) = multipart.next_field().await.map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(Message::new("잘못된 업로드 요청입니다.")),
        )
    })? {
        if field.name() == Some("file") {
            let text = field.text().await.map_err(|_| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(Message::new("파일을 읽을 수 없습니다.")),
                )
            })?;
            file_text = Some(text);
            break;
        }
    }

    let text = file_text.filter(|t| !t.trim().is_empty()).ok_or((
        StatusCode::BAD_REQUEST,
        Json(Message::new("파일이 비었습니다.")),
    ))?;

    let rows = roster_csv::parse(&text);
    ParticipantService::import(state.db(), &rows, query.replace_all)
        .await
        .map(Json)
        .map_err(service_error)
}
