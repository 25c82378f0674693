use axum::http::{HeaderMap, HeaderValue, header};
use axum::response::Response;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared::session::SESSION_COOKIE_NAME;

/// Extracts and authenticates the session token from the request's Cookie
/// header. Unsigned or tampered values are treated as absent, so a forged
/// cookie simply starts a fresh session.
pub(super) fn session_token_from_headers(headers: &HeaderMap, secret: &str) -> Option<String> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    let value = cookie_value(raw, SESSION_COOKIE_NAME)?;
    verify_signed_token(value, secret)
}

/// Sets the session cookie on newly minted sessions. Every surface that
/// resolves a session goes through this, so success and error responses
/// alike carry the cookie.
pub(super) fn attach_session_cookie(
    mut response: Response,
    session_id: &str,
    secret: &str,
    ttl_seconds: u64,
    is_new: bool,
) -> Response {
    if !is_new {
        return response;
    }

    let cookie = format!(
        "{SESSION_COOKIE_NAME}={}; Max-Age={ttl_seconds}; Path=/; Secure; HttpOnly; SameSite=Strict",
        signed_cookie_token(session_id, secret)
    );
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(header::SET_COOKIE, value);
    }
    response
}

pub(super) fn signed_cookie_token(token: &str, secret: &str) -> String {
    format!("{token}.{}", sign_token(token, secret))
}

fn verify_signed_token(value: &str, secret: &str) -> Option<String> {
    let (token, tag) = value.rsplit_once('.')?;
    if token.is_empty() || !constant_time_eq(tag, &sign_token(token, secret)) {
        return None;
    }
    Some(token.to_string())
}

fn cookie_value<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    raw.split(';').map(str::trim).find_map(|pair| {
        pair.strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
    })
}

fn sign_token(token: &str, secret: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts signing key of any size");
    mac.update(token.as_bytes());
    to_lower_hex(mac.finalize().into_bytes().as_slice())
}

fn constant_time_eq(left: &str, right: &str) -> bool {
    if left.len() != right.len() {
        return false;
    }

    let mut diff = 0_u8;
    for (lhs, rhs) in left.as_bytes().iter().zip(right.as_bytes().iter()) {
        diff |= lhs ^ rhs;
    }

    diff == 0
}

fn to_lower_hex(bytes: &[u8]) -> String {
    let mut hex = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        use std::fmt::Write;
        let _ = write!(hex, "{byte:02x}");
    }
    hex
}
