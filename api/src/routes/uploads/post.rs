use axum::{
    Json,
    extract::Multipart,
    http::StatusCode,
};
use rand::{RngCore, rngs::OsRng};
use serde_json::{Value, json};
use std::path::Path;

use util::config::AppConfig;

use crate::response::Message;

/// POST `/api/admin/upload/logo`
///
/// Accepts a single multipart image and stores it under a random
/// `logo-XXXXXXXX.<ext>` name; the returned URL is what the client writes
/// into the `logo_url` setting.
pub async fn upload_logo(
    mut multipart: Multipart,
) -> Result<Json<Value>, (StatusCode, Json<Message>)> {
    let bad_request = |msg: &str| (StatusCode::BAD_REQUEST, Json(Message::new(msg)));

    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| bad_request("잘못된 업로드 요청입니다."))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if !field
            .content_type()
            .is_some_and(|ct| ct.starts_with("image/"))
        {
            return Err(bad_request("이미지 파일만 업로드 가능합니다."));
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|_| bad_request("파일을 읽을 수 없습니다."))?;
        upload = Some((file_name, bytes.to_vec()));
        break;
    }

    let Some((original_name, bytes)) = upload.filter(|(_, b)| !b.is_empty()) else {
        return Err(bad_request("파일이 비어있습니다."));
    };

    let extension = Path::new(&original_name)
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut suffix = [0u8; 4];
    OsRng.fill_bytes(&mut suffix);
    let file_name = format!("logo-{}{}", hex::encode(suffix), extension);

    let upload_root = AppConfig::global().upload_root.clone();
    let dir = Path::new(&upload_root);
    tokio::fs::create_dir_all(dir).await.map_err(|e| {
        tracing::error!(error = %e, "failed to create upload directory");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Message::new("파일 저장 실패")),
        )
    })?;
    tokio::fs::write(dir.join(&file_name), &bytes)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to store upload");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(Message::new("파일 저장 실패")),
            )
        })?;

    Ok(Json(json!({ "url": format!("/api/uploads/{file_name}") })))
}
