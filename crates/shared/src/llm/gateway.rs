use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::conversation::Turn;

pub type ChatGatewayFuture<'a> =
    Pin<Box<dyn Future<Output = Result<String, ChatGatewayError>> + Send + 'a>>;

#[derive(Debug, Error)]
pub enum ChatGatewayError {
    /// The provider answered with a non-success status. The body is kept
    /// verbatim so callers can surface it.
    #[error("chat provider request failed with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },
    /// The request never completed (connect failure, timeout). No response
    /// body exists.
    #[error("chat provider request did not complete: {0}")]
    Transport(String),
    /// The provider answered with a success status but the payload was not
    /// the expected chat-completion shape. The raw body is kept for
    /// diagnostics.
    #[error("chat provider returned an invalid payload: {body}")]
    InvalidPayload { body: String },
}

/// Boundary to the hosted model: one prompt plus recent history in, one
/// reply out. Implementations issue exactly one upstream request per call
/// (failures are surfaced, never retried) and must not mutate the supplied
/// history.
pub trait ChatGateway: Send + Sync {
    fn complete<'a>(&'a self, prompt: &'a str, history: &'a [Turn]) -> ChatGatewayFuture<'a>;
}
