//! Sign-in and sign-out handlers

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use serde::Deserialize;

use crate::middleware::auth::{clear_session_cookie, cookie_value, evaluate, session_cookie, GuardState, LOGIN_PATH};
use crate::state::AppContext;
use crate::utils::errors::{Result, TechClubError};
use crate::views::login::render_login;
use crate::views::{render_page, Nav};

const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

fn with_cookie(mut response: Response, cookie: &str) -> Result<Response> {
    let value: HeaderValue = cookie
        .parse()
        .map_err(|_| TechClubError::Config("Session cookie name is not a valid header value".to_string()))?;
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}

pub async fn login_page(State(ctx): State<AppContext>, headers: HeaderMap) -> Result<Response> {
    if let GuardState::Authorized(_) = evaluate(&ctx, &headers).await? {
        return Ok(Redirect::to(ADMIN_PATH).into_response());
    }
    Ok(Html(render_page("Sign in", Nav::Login, &render_login("", None))).into_response())
}

pub async fn login(State(ctx): State<AppContext>, Form(form): Form<LoginForm>) -> Result<Response> {
    match ctx.auth.sign_in(&form.email, &form.password).await {
        Ok(session) => {
            let cookie = session_cookie(
                ctx.session_cookie(),
                &session.token,
                session.remaining_seconds(),
                ctx.settings.server.secure_cookies,
            );
            with_cookie(Redirect::to(ADMIN_PATH).into_response(), &cookie)
        }
        Err(TechClubError::Auth(message)) => {
            let page = render_page("Sign in", Nav::Login, &render_login(&form.email, Some(&message)));
            Ok((StatusCode::UNAUTHORIZED, Html(page)).into_response())
        }
        Err(e) => Err(e),
    }
}

/// Close the session, if any, and return to the sign-in page
pub async fn logout(State(ctx): State<AppContext>, headers: HeaderMap) -> Result<Response> {
    if let Some(token) = cookie_value(&headers, ctx.session_cookie()) {
        ctx.auth.sign_out(&token).await?;
    }
    let cookie = clear_session_cookie(ctx.session_cookie(), ctx.settings.server.secure_cookies);
    with_cookie(Redirect::to(LOGIN_PATH).into_response(), &cookie)
}
