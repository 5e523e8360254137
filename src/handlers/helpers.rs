use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use rand::RngCore;
use std::sync::PoisonError;

use crate::models::AppState;
use crate::planner::{lock, SharedSession};

pub const SESSION_COOKIE: &str = "session_id";

pub fn random_session_id() -> String {
    let mut b = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut b);
    hex::encode(b)
}

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Existing planning session for this browser, if any. Never creates one.
pub fn existing_session(state: &AppState, jar: &CookieJar) -> Option<(String, SharedSession)> {
    let sid = session_id_from_jar(jar)?;
    let session = state.session(&sid)?;
    Some((sid, session))
}

/// Planning session for this browser, created (with its cookie) on first visit.
pub fn ensure_session(state: &AppState, jar: CookieJar) -> (CookieJar, String, SharedSession) {
    if let Some((sid, session)) = existing_session(state, &jar) {
        return (jar, sid, session);
    }
    let sid = random_session_id();
    let session = state.create_session(sid.clone());
    tracing::debug!("Started planning session");
    let mut cookie = Cookie::new(SESSION_COOKIE, sid.clone());
    cookie.set_path("/");
    cookie.set_http_only(true);
    (jar.add(cookie), sid, session)
}

pub fn push_flash(state: &AppState, sid: &str, msg: impl Into<String>) {
    state
        .flash_store
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .entry(sid.to_string())
        .or_default()
        .push(msg.into());
}

pub fn take_flash_messages(state: &AppState, sid: &str) -> Vec<String> {
    state
        .flash_store
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .remove(sid)
        .unwrap_or_default()
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// Back to the planning page of the session's country, or home.
pub fn redirect_to_planner(session: &SharedSession) -> Redirect {
    match lock(session).selection().country {
        Some(code) => Redirect::to(&format!("/main?country={}", code)),
        None => Redirect::to("/"),
    }
}
