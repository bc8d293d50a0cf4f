use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::http::routes::{export, form, health};
use crate::state::AppState;

pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/", get(form::index))
        .route("/health", get(health::health))
        .route("/v1/comments.docx", get(export::get_comments_docx))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
