use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use shared::llm::{ChatGateway, ChatGatewayError};
use shared::models::{ChatRequest, ChatResponse, ResetResponse};
use shared::session::{SessionStore, resolve_session_token};
use tracing::warn;

use super::AppState;
use super::cookies::{attach_session_cookie, session_token_from_headers};
use super::errors::error_response;

pub(super) const MAX_PROMPT_CHARS: usize = 2000;

pub(super) async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let (session_id, is_new) = resolve_session_token(
        session_token_from_headers(&headers, &state.session_secret).as_deref(),
    );

    // Tolerate a missing or non-JSON body; it fails prompt validation below.
    let request: ChatRequest = serde_json::from_slice(&body).unwrap_or_default();
    let prompt = request.prompt.trim();

    let response = if prompt.is_empty() {
        error_response(StatusCode::BAD_REQUEST, "prompt is required")
    } else if prompt.chars().count() > MAX_PROMPT_CHARS {
        error_response(StatusCode::PAYLOAD_TOO_LARGE, "prompt too long")
    } else {
        let mut window = state.store.load(&session_id).await;
        let completion = state.gateway.complete(prompt, window.turns()).await;
        match completion {
            Ok(answer) => {
                window.append_exchange(prompt, answer.clone());
                state.store.save(&session_id, window).await;
                (StatusCode::OK, Json(ChatResponse { answer })).into_response()
            }
            Err(err) => {
                warn!("chat completion failed: {err}");
                gateway_error_response(err)
            }
        }
    };

    attach_session_cookie(
        response,
        &session_id,
        &state.session_secret,
        state.session_ttl_seconds,
        is_new,
    )
}

pub(super) async fn reset(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (session_id, is_new) = resolve_session_token(
        session_token_from_headers(&headers, &state.session_secret).as_deref(),
    );

    state.store.clear(&session_id).await;

    attach_session_cookie(
        (StatusCode::OK, Json(ResetResponse::ok())).into_response(),
        &session_id,
        &state.session_secret,
        state.session_ttl_seconds,
        is_new,
    )
}

fn gateway_error_response(err: ChatGatewayError) -> Response {
    match err {
        ChatGatewayError::UpstreamStatus { body, .. } => {
            error_response(StatusCode::BAD_GATEWAY, &body)
        }
        other => error_response(StatusCode::INTERNAL_SERVER_ERROR, &other.to_string()),
    }
}
