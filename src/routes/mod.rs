// src/routes/mod.rs
pub mod chat;

use crate::page::{RESPONSE_ENDPOINT, render_page};
use crate::state::SharedState;
use axum::{
    Router,
    extract::State,
    response::Html,
    routing::{get, post},
};
use chat::{method_not_allowed, response_handler};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Directory holding the chat widget assets, served under `/static`.
pub const STATIC_DIR: &str = "public";

pub fn create_router() -> Router<SharedState> {
    Router::new()
        .route("/", get(index_handler))
        .route(
            RESPONSE_ENDPOINT,
            post(response_handler).fallback(method_not_allowed),
        )
        .route("/health", get(|| async { "OK" }))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(TraceLayer::new_for_http())
}

async fn index_handler(State(state): State<SharedState>) -> Html<String> {
    Html(render_page(&state.page))
}
