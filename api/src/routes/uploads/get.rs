use axum::{
    Json,
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use util::config::AppConfig;

use crate::response::Message;

/// GET `/api/uploads/{file_name}`
///
/// Serves a stored upload (the logo). Only plain file names resolve; path
/// traversal is rejected outright.
pub async fn serve_upload(Path(file_name): Path<String>) -> Response {
    if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
        return (
            StatusCode::NOT_FOUND,
            Json(Message::new("파일을 찾을 수 없습니다.")),
        )
            .into_response();
    }

    let upload_root = AppConfig::global().upload_root.clone();
    let path = std::path::Path::new(&upload_root).join(&file_name);

    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&path).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.to_string())],
                bytes,
            )
                .into_response()
        }
        Err(_) => (
            StatusCode::NOT_FOUND,
            Json(Message::new("파일을 찾을 수 없습니다.")),
        )
            .into_response(),
    }
}
