use axum::{Json, http::StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

use util::config::AppConfig;

use crate::auth::generate_admin_token;
use crate::response::Message;

#[derive(Debug, Deserialize)]
pub struct VerifyPinPayload {
    pub pin: String,
}

/// POST `/api/admin/auth/verify`
///
/// Verifies the admin PIN and issues the expiring admin token used as the
/// Bearer credential on `/api/admin/...`.
pub async fn verify_pin(
    Json(payload): Json<VerifyPinPayload>,
) -> Result<Json<Value>, (StatusCode, Json<Message>)> {
    if payload.pin.trim().is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(Message::new("PIN을 입력해주세요")),
        ));
    }

    let expected = AppConfig::global().admin_pin.clone();
    if payload.pin != expected {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(Message::new("비밀번호가 일치하지 않습니다")),
        ));
    }

    let (token, expires_at) = generate_admin_token();
    Ok(Json(json!({
        "success": true,
        "message": "인증 성공",
        "token": token,
        "expiresAt": expires_at,
    })))
}
