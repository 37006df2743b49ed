//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - public: health, participant search, check-in submission, session lookup
//!   by short code, public settings, uploaded files
//! - `/api/admin/auth` → PIN verification issuing the admin token (public)
//! - `/api/admin/...` → roster, sessions, attendance and settings management,
//!   guarded by the admin token

use axum::{
    Router,
    middleware::from_fn,
    routing::{get, post},
};
use util::state::AppState;

use crate::auth::guards::allow_admin;

pub mod attendances;
pub mod auth;
pub mod checkin;
pub mod health;
pub mod participants;
pub mod sessions;
pub mod settings;
pub mod uploads;

/// Builds the complete application router.
pub fn app(app_state: AppState) -> Router {
    Router::new().nest("/api", api_routes(app_state))
}

fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/checkin", post(checkin::post::submit_checkin))
        .route(
            "/participants/search",
            get(participants::get::search_participants),
        )
        .route(
            "/sessions/code/{short_code}",
            get(sessions::get::get_session_by_code),
        )
        .nest("/settings", settings::public_routes())
        .route("/uploads/{file_name}", get(uploads::get::serve_upload))
        .nest("/admin/auth", auth::auth_routes())
        .nest("/admin", admin_routes())
        .with_state(app_state)
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .nest("/sessions", sessions::admin_routes())
        .nest("/participants", participants::admin_routes())
        .nest("/attendances", attendances::admin_routes())
        .nest("/settings", settings::admin_routes())
        .nest("/upload", uploads::admin_routes())
        .route_layer(from_fn(allow_admin))
}
