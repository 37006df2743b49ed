use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};

use services::session_service::{Session, SessionService};

/// Admin session row. Deliberately excludes `token`; only the QR payload
/// carries it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: String,
    pub title: String,
    pub session_date: String,
    pub starts_at: String,
    pub ends_at: String,
    pub status: String,
    pub created_at: String,
    pub short_code: String,
    pub qr_url: String,
}

impl From<Session> for SessionResponse {
    fn from(s: Session) -> Self {
        let qr_url = SessionService::checkin_url(&s.short_code);
        Self {
            id: s.id,
            title: s.title,
            session_date: s.session_date,
            starts_at: s.starts_at,
            ends_at: s.ends_at,
            status: s.status.to_string(),
            created_at: s.created_at.to_rfc3339(),
            short_code: s.short_code,
            qr_url,
        }
    }
}

/// QR payload: the session plus its submission token and the external
/// QR-image URL. Admin-only.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQrResponse {
    #[serde(flatten)]
    pub session: SessionResponse,
    pub token: String,
    pub qr_image_url: String,
}

impl From<Session> for SessionQrResponse {
    fn from(s: Session) -> Self {
        let token = s.token.clone();
        let session = SessionResponse::from(s);
        // QR rendering is delegated to an external image service; the data is
        // carried in the URL.
        let qr_image_url = format!(
            "https://api.qrserver.com/v1/create-qr-code/?size=400x400&data={}",
            utf8_percent_encode(&session.qr_url, NON_ALPHANUMERIC)
        );
        Self {
            session,
            token,
            qr_image_url,
        }
    }
}

/// Public by-code lookup response; no token, no QR URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionPublicResponse {
    pub id: String,
    pub title: String,
    pub session_date: String,
    pub status: String,
    pub short_code: String,
}

impl From<Session> for SessionPublicResponse {
    fn from(s: Session) -> Self {
        Self {
            id: s.id,
            title: s.title,
            session_date: s.session_date,
            status: s.status.to_string(),
            short_code: s.short_code,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionPayload {
    pub title: String,
    pub session_date: String,
}
