use axum::{
    Router,
    routing::{get, put},
};
use util::state::AppState;

pub mod get;
pub mod put;

/// Unauthenticated settings reads used by the check-in pages.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/church-name", get(get::church_name))
        .route("/simple-checkin-mode", get(get::simple_checkin_mode))
}

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::all_settings))
        .route("/{key}", put(put::update_setting))
}
