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
        .route("/", get(get::list_participants).post(post::add_participant))
        .route("/{participant_id}", delete(delete::remove_participant))
        .route("/import", post(post::import_roster))
        .route("/template", get(get::download_template))
        .route("/count", get(get::count_participants))
        .route("/stats/by-district", get(get::stats_by_district))
}
