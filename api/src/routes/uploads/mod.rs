use axum::{Router, routing::post};
use util::state::AppState;

pub mod get;
pub mod post;

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/logo", post(post::upload_logo))
}
