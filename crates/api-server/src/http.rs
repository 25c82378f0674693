use std::sync::Arc;

use axum::routing::{get, post};
use axum::{Router, middleware};
use shared::llm::ChatGateway;
use shared::session::SessionStore;

mod chat;
mod cookies;
mod errors;
mod headers;
mod page;

/// Application context built once at startup: the injected session store,
/// the model gateway, and the cookie-signing material.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub gateway: Arc<dyn ChatGateway>,
    pub session_secret: String,
    pub session_ttl_seconds: u64,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(page::index))
        .route("/app.js", get(page::app_js))
        .route("/api/chat", post(chat::chat))
        .route("/api/reset", post(chat::reset))
        .layer(middleware::from_fn(headers::security_headers))
        .with_state(app_state)
}
