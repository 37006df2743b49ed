use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use std::collections::HashMap;

use services::settings_service::SettingsService;
use util::state::AppState;

use crate::response::{Message, service_error};

/// GET `/api/settings/church-name`
pub async fn church_name(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Message>)> {
    SettingsService::church_name(state.db())
        .await
        .map(|name| Json(json!({ "churchName": name })))
        .map_err(service_error)
}

/// GET `/api/settings/simple-checkin-mode`
pub async fn simple_checkin_mode(
    State(state): State<AppState>,
) -> Result<Json<Value>, (StatusCode, Json<Message>)> {
    SettingsService::simple_checkin_mode(state.db())
        .await
        .map(|enabled| Json(json!({ "enabled": enabled })))
        .map_err(service_error)
}

/// GET `/api/admin/settings`
pub async fn all_settings(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, String>>, (StatusCode, Json<Message>)> {
    SettingsService::get_all(state.db())
        .await
        .map(Json)
        .map_err(service_error)
}
