use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use serde_json::{Value, json};

use services::settings_service::SettingsService;
use util::state::AppState;

use crate::response::{Message, service_error};

#[derive(Debug, Deserialize)]
pub struct UpdateSettingPayload {
    pub value: String,
}

/// PUT `/api/admin/settings/{key}`
///
/// Only the known keys are writable; the new value takes effect on the next
/// read.
pub async fn update_setting(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(payload): Json<UpdateSettingPayload>,
) -> Result<Json<Value>, (StatusCode, Json<Message>)> {
    SettingsService::set(state.db(), &key, &payload.value)
        .await
        .map_err(service_error)?;
    Ok(Json(json!({ "key": key, "value": payload.value })))
}
