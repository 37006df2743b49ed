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
        .route("/", get(get::list_attendances))
        .route("/", delete(delete::delete_attendances))
        .route("/count", get(get::count_attendances))
        .route("/export.csv", get(get::export_attendances_csv))
        .route("/stats/by-district", get(get::stats_by_district))
        .route("/cleanup/status", get(get::cleanup_status))
        .route("/cleanup/run", post(post::run_cleanup))
}
