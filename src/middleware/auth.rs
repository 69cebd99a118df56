//! Authentication middleware
//!
//! This module provides the route guard protecting the admin panel. The
//! guard is evaluated once per request: it reads the session cookie, looks
//! the session up, and either grants access or redirects to the login page
//! while clearing the cookie.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use tracing::{debug, warn};

use crate::state::{AppContext, Session};
use crate::utils::errors::Result;

pub const LOGIN_PATH: &str = "/login";

/// Outcome of evaluating the guard for a request
#[derive(Debug)]
pub enum GuardState {
    Authorized(Session),
    Unauthorized,
}

/// Value of the named cookie, if the request carries one
pub fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value carrying a session token
pub fn session_cookie(name: &str, token: &str, max_age: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, token, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie
pub fn clear_session_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}

/// Evaluate the guard against the request headers
pub async fn evaluate(ctx: &AppContext, headers: &HeaderMap) -> Result<GuardState> {
    let Some(token) = cookie_value(headers, ctx.session_cookie()) else {
        debug!("No session cookie present");
        return Ok(GuardState::Unauthorized);
    };

    match ctx.auth.get_session(&token).await? {
        Some(session) => Ok(GuardState::Authorized(session)),
        None => {
            debug!("Session cookie does not name a live session");
            Ok(GuardState::Unauthorized)
        }
    }
}

/// Redirect to the login page, discarding the session cookie
pub fn login_redirect(ctx: &AppContext) -> Response {
    let cookie = clear_session_cookie(ctx.session_cookie(), ctx.settings.server.secure_cookies);
    let mut response = Redirect::to(LOGIN_PATH).into_response();
    if let Ok(value) = HeaderValue::from_str(&cookie) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

/// Extractor for guarded handlers, rejecting with a login redirect
#[derive(Debug)]
pub struct AdminSession(pub Session);

#[async_trait]
impl FromRequestParts<AppContext> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, ctx: &AppContext) -> std::result::Result<Self, Self::Rejection> {
        match evaluate(ctx, &parts.headers).await {
            Ok(GuardState::Authorized(session)) => Ok(AdminSession(session)),
            Ok(GuardState::Unauthorized) => {
                warn!(path = %parts.uri.path(), "Unauthorized admin access attempt");
                Err(login_redirect(ctx))
            }
            Err(e) => Err(e.into_response()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_static("theme=dark; techclub_session=abc123"));
        assert_eq!(cookie_value(&headers, "techclub_session"), Some("abc123".to_string()));
        assert_eq!(cookie_value(&headers, "missing"), None);

        headers.insert(COOKIE, HeaderValue::from_static("techclub_session="));
        assert_eq!(cookie_value(&headers, "techclub_session"), None);
    }

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("techclub_session", "tok", 3600, true);
        assert!(cookie.starts_with("techclub_session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.ends_with("; Secure"));

        let cleared = clear_session_cookie("techclub_session", false);
        assert!(cleared.contains("Max-Age=0"));
        assert!(!cleared.contains("Secure"));
    }
}
