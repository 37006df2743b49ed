use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use util::config::AppConfig;

use crate::auth::claims::{AuthAdmin, Claims};
use crate::response::Message;

/// Extracts and verifies the admin Bearer token.
///
/// Rejects with `401 Unauthorized` when the header is missing or the token is
/// invalid or expired.
impl<S> FromRequestParts<S> for AuthAdmin
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<Message>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    (
                        StatusCode::UNAUTHORIZED,
                        Json(Message::new("인증이 필요합니다.")),
                    )
                })?;

        let secret = AppConfig::global().jwt_secret.clone();
        let token_data = decode::<Claims>(
            bearer.token(),
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(Message::new("유효하지 않거나 만료된 토큰입니다.")),
            )
        })?;

        Ok(AuthAdmin(token_data.claims))
    }
}
