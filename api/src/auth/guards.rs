use axum::{
    Json,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::auth::claims::AuthAdmin;
use crate::response::Message;

/// Admin-only guard for the `/api/admin` subtree.
pub async fn allow_admin(
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<Message>)> {
    let (mut parts, body) = req.into_parts();

    let admin = AuthAdmin::from_request_parts(&mut parts, &()).await?;
    if !admin.0.admin {
        return Err((
            StatusCode::FORBIDDEN,
            Json(Message::new("관리자 권한이 필요합니다.")),
        ));
    }

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(admin);
    Ok(next.run(req).await)
}
