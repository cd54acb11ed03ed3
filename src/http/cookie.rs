use axum::http::{header, HeaderMap, HeaderValue};

use crate::session::SessionId;

/// Name of the cookie holding the session id
pub const SESSION_COOKIE: &str = "lk_session";

/// Session id from the request's `Cookie` headers, if present and well-formed
pub fn session_from_headers(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| SessionId::parse(value.trim()))
}

/// `Set-Cookie` value for a newly issued session
pub fn session_cookie(id: &SessionId) -> Option<HeaderValue> {
    let cookie = format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, id);
    HeaderValue::from_str(&cookie).ok()
}
