use axum::{Router, body::Body, extract::ConnectInfo, http::Request};
use sea_orm::DatabaseConnection;
use util::state::AppState;

/// Builds the full application router against a fresh in-memory database.
pub async fn make_test_app() -> (Router, DatabaseConnection) {
    let db = db::test_utils::setup_test_db().await;
    let state = AppState::new(db.clone());
    (api::routes::app(state), db)
}

/// `Authorization` header value holding a freshly issued admin token.
pub fn admin_bearer() -> String {
    let (token, _) = api::auth::generate_admin_token();
    format!("Bearer {token}")
}

/// Attaches a `ConnectInfo<SocketAddr>` to a request, as the real server does
/// via `into_make_service_with_connect_info`.
pub fn with_connect_info(mut req: Request<Body>, ip: [u8; 4]) -> Request<Body> {
    use std::net::{IpAddr, Ipv4Addr, SocketAddr};
    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::from(ip)), 43210);
    req.extensions_mut().insert(ConnectInfo(addr));
    req
}

/// Reads a response body into JSON.
pub async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Reads a response body as text.
pub async fn body_text(res: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    String::from_utf8(bytes.to_vec()).expect("body is UTF-8")
}

/// Builds a single-field `multipart/form-data` body.
pub fn multipart_file(
    boundary: &str,
    file_name: &str,
    content_type: &str,
    data: &[u8],
) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}
