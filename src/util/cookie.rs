//! Session cookie utilities
//!
//! The session token travels exclusively in an HTTP-only cookie. All
//! attributes are fixed here so every handler sets the same cookie shape.

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use cookie::{time::Duration, Cookie, SameSite};

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "token";

/// Error types for cookie operations
#[derive(Debug, thiserror::Error)]
pub enum CookieError {
    #[error("Invalid cookie value: {0}")]
    InvalidValue(String),
}

/// Append a `Set-Cookie` header carrying the session token.
///
/// HttpOnly and SameSite=Strict are always set; `secure` must be true
/// outside development mode.
pub fn set_session_cookie(
    headers: &mut HeaderMap,
    token: &str,
    max_age_minutes: i64,
    secure: bool,
) -> Result<(), CookieError> {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .secure(secure)
        .max_age(Duration::minutes(max_age_minutes))
        .build();
    append_cookie(headers, &cookie)
}

/// Append a `Set-Cookie` header that expires the session cookie immediately.
pub fn clear_session_cookie(headers: &mut HeaderMap) -> Result<(), CookieError> {
    let cookie = Cookie::build((SESSION_COOKIE_NAME, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::ZERO)
        .build();
    append_cookie(headers, &cookie)
}

/// Read the session token from the request `Cookie` header, if present.
pub fn read_session_cookie(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(COOKIE)?.to_str().ok()?;
    Cookie::split_parse(raw)
        .filter_map(|parsed| parsed.ok())
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

fn append_cookie(headers: &mut HeaderMap, cookie: &Cookie<'_>) -> Result<(), CookieError> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| CookieError::InvalidValue(e.to_string()))?;
    headers.append(SET_COOKIE, value);
    Ok(())
}
