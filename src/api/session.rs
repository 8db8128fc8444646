use anyhow::anyhow;
use axum::http::HeaderMap;
use axum_extra::extract::cookie::{Key, SignedCookieJar};

/// Name of the signed cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "todolist_session_token";

/// Builds the signing key for session cookies from the configured secret, which must be at least
/// 64 bytes long
pub fn cookie_key_from_secret(secret: &str) -> Result<Key, anyhow::Error> {
    Key::try_from(secret.as_bytes())
        .map_err(|err| anyhow!("the session secret cannot be used as a signing key: {err}"))
}

/// Pulls the session token out of the request's session cookie. A cookie whose signature
/// doesn't check out is treated the same as no cookie at all.
pub fn session_token(headers: &HeaderMap, cookie_key: &Key) -> Option<String> {
    SignedCookieJar::from_headers(headers, cookie_key.clone())
        .get(SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}
