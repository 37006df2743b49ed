use axum::{
    Router,
    routing::{delete, get, post},
};
use util::state::AppState;

pub mod common;
pub mod delete;
pub mod get;
pub mod post;

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(get::list_sessions).post(post::create_session))
        .route("/{session_id}", get(get::get_session))
        .route("/{session_id}", delete(delete::remove_session))
        .route("/{session_id}/qr", get(get::get_session_qr))
        .route("/{session_id}/close", post(post::close_session))
}
