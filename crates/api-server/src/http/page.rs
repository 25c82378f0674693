use axum::extract::State;
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Response};
use shared::session::resolve_session_token;

use super::AppState;
use super::cookies::{attach_session_cookie, session_token_from_headers};

const INDEX_HTML: &str = include_str!("../../static/index.html");
const APP_JS: &str = include_str!("../../static/app.js");

pub(super) async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_token(
        session_token_from_headers(&headers, &state.session_secret).as_deref(),
    );

    attach_session_cookie(
        Html(INDEX_HTML).into_response(),
        &session_id,
        &state.session_secret,
        state.session_ttl_seconds,
        is_new,
    )
}

pub(super) async fn app_js() -> Response {
    (
        [(header::CONTENT_TYPE, "text/javascript; charset=utf-8")],
        APP_JS,
    )
        .into_response()
}
