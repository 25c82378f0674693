#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;

use api_server::http::{AppState, build_router};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::{Value, json};
use shared::conversation::Turn;
use shared::llm::{ChatGateway, ChatGatewayError, ChatGatewayFuture};
use shared::session::{InMemorySessionStore, SESSION_COOKIE_NAME};
use tokio::sync::Mutex;
use tower::ServiceExt;

pub const TEST_SESSION_SECRET: &str = "integration-test-secret";
pub const TEST_SESSION_TTL_SECONDS: u64 = 86_400;

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub history: Vec<Turn>,
}

/// Scripted stand-in for the model gateway. Records every call so tests can
/// assert both what was asked and that nothing was asked at all.
pub struct MockChatGateway {
    replies: Mutex<VecDeque<Result<String, ChatGatewayError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockChatGateway {
    pub fn with_replies(replies: Vec<Result<String, ChatGatewayError>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }
}

impl ChatGateway for MockChatGateway {
    fn complete<'a>(&'a self, prompt: &'a str, history: &'a [Turn]) -> ChatGatewayFuture<'a> {
        Box::pin(async move {
            self.calls.lock().await.push(RecordedCall {
                prompt: prompt.to_string(),
                history: history.to_vec(),
            });
            self.replies
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Ok(format!("reply to {prompt}")))
        })
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemorySessionStore>,
    pub gateway: Arc<MockChatGateway>,
}

pub fn build_test_app(replies: Vec<Result<String, ChatGatewayError>>) -> TestApp {
    let store = Arc::new(InMemorySessionStore::new());
    let gateway = Arc::new(MockChatGateway::with_replies(replies));

    let router = build_router(AppState {
        store: store.clone(),
        gateway: gateway.clone(),
        session_secret: TEST_SESSION_SECRET.to_string(),
        session_ttl_seconds: TEST_SESSION_TTL_SECONDS,
    });

    TestApp {
        router,
        store,
        gateway,
    }
}

pub struct JsonResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

pub async fn send_json(app: &Router, request: Request<Body>) -> JsonResponse {
    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("request should succeed");
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should read");
    let body = serde_json::from_slice::<Value>(&body).unwrap_or_else(|_| json!({}));

    JsonResponse {
        status,
        headers,
        body,
    }
}

pub fn request(
    method: Method,
    uri: &str,
    cookie: Option<&str>,
    json_body: Option<Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    match json_body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    }
}

/// `name=value` pair from the response's Set-Cookie header, ready to echo
/// back as a Cookie header.
pub fn session_cookie_pair(response: &JsonResponse) -> Option<String> {
    let raw = response.headers.get(header::SET_COOKIE)?.to_str().ok()?;
    let pair = raw.split(';').next()?.trim();
    assert!(pair.starts_with(SESSION_COOKIE_NAME));
    Some(pair.to_string())
}

/// The bare session token a cookie pair resolves to, which is also the key
/// the session store uses.
pub fn session_token(cookie_pair: &str) -> String {
    let signed = cookie_pair
        .strip_prefix(SESSION_COOKIE_NAME)
        .and_then(|rest| rest.strip_prefix('='))
        .expect("cookie pair should carry the session cookie");
    let (token, _tag) = signed
        .rsplit_once('.')
        .expect("session cookie value should be signed");
    token.to_string()
}
