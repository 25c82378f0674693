use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::conversation::{ConversationWindow, MAX_WINDOW_TURNS};

pub const SESSION_COOKIE_NAME: &str = "parley_session";

pub type SessionStoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Process-wide mapping from opaque session identifier to that session's
/// conversation window. Implementations decide durability; the bundled
/// in-memory store forgets everything on restart, and a deployment that
/// needs eviction or cross-process sharing can inject a different
/// implementation without touching handler logic.
pub trait SessionStore: Send + Sync {
    /// Returns the stored window, or an empty one when the identifier is
    /// unknown. Never fails: an expired or forged identifier is simply a
    /// fresh session.
    fn load<'a>(&'a self, session_id: &'a str) -> SessionStoreFuture<'a, ConversationWindow>;

    /// Stores the window trimmed to the retention cap, overwriting any
    /// prior value.
    fn save<'a>(
        &'a self,
        session_id: &'a str,
        window: ConversationWindow,
    ) -> SessionStoreFuture<'a, ()>;

    /// Removes the record. Clearing an absent session is not an error.
    fn clear<'a>(&'a self, session_id: &'a str) -> SessionStoreFuture<'a, ()>;
}

/// Returns the caller's session identifier plus whether it was freshly
/// minted. An incoming token is taken at face value; identity beyond
/// possession of the opaque token is out of scope.
pub fn resolve_session_token(incoming: Option<&str>) -> (String, bool) {
    match incoming {
        Some(token) if !token.trim().is_empty() => (token.to_string(), false),
        _ => (mint_session_token(), true),
    }
}

fn mint_session_token() -> String {
    format!(
        "sess_{}{}",
        Uuid::new_v4().as_simple(),
        Uuid::new_v4().as_simple()
    )
}

/// In-memory session store. Session count grows unbounded and concurrent
/// saves to one session race with last-write-wins; both are accepted for
/// the one-user-per-session pattern this serves.
#[derive(Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, ConversationWindow>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn load<'a>(&'a self, session_id: &'a str) -> SessionStoreFuture<'a, ConversationWindow> {
        Box::pin(async move {
            self.sessions
                .lock()
                .await
                .get(session_id)
                .cloned()
                .unwrap_or_default()
        })
    }

    fn save<'a>(
        &'a self,
        session_id: &'a str,
        mut window: ConversationWindow,
    ) -> SessionStoreFuture<'a, ()> {
        Box::pin(async move {
            window.trim_to(MAX_WINDOW_TURNS);
            self.sessions
                .lock()
                .await
                .insert(session_id.to_string(), window);
        })
    }

    fn clear<'a>(&'a self, session_id: &'a str) -> SessionStoreFuture<'a, ()> {
        Box::pin(async move {
            self.sessions.lock().await.remove(session_id);
        })
    }
}
