use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::models::{AppState, CountryCode, PlannerView, Theme};
use crate::planner::{self, lock, parse_date, SharedSession};
use crate::templates::MainTemplate;

use super::helpers::{
    ensure_session, existing_session, push_flash, redirect_to_planner, render_template, take_flash_messages,
};

#[derive(Deserialize)]
pub struct MainQuery {
    pub country: Option<String>,
}

#[derive(Deserialize)]
pub struct RegionForm {
    pub region: String,
}

#[derive(Deserialize)]
pub struct DatesForm {
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
}

#[derive(Deserialize)]
pub struct ThemeForm {
    #[serde(default)]
    pub theme: String,
}

#[derive(Deserialize)]
pub struct LandmarkForm {
    pub landmark_id: i64,
}

#[derive(Deserialize)]
pub struct ChecklistRemoveForm {
    pub key: String,
}

/// Empty input clears the date; anything else must be `YYYY-MM-DD`.
fn optional_date(raw: &str) -> Result<Option<chrono::NaiveDate>, crate::error::PlanError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    parse_date(raw).map(Some)
}

pub async fn main_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(q): Query<MainQuery>,
) -> Response {
    let Some(country) = q.country.as_deref().and_then(|c| c.parse::<CountryCode>().ok()) else {
        tracing::debug!(country = ?q.country, "Planner opened without a usable country");
        return Redirect::to("/").into_response();
    };
    let (jar, sid, session) = ensure_session(&state, jar);
    planner::choose_country(&session, &state.api, country).await;
    let view = PlannerView::from_session(&lock(&session));
    let page = MainTemplate {
        flash_messages: take_flash_messages(&state, &sid),
        view,
    };
    (jar, render_template(page)).into_response()
}

/// Session for a form post. Posting without one means the browser never
/// opened the planner, so it is sent home.
fn posted_session(state: &AppState, jar: &CookieJar) -> Result<(String, SharedSession), Redirect> {
    existing_session(state, jar).ok_or_else(|| Redirect::to("/"))
}

pub async fn region_post(State(state): State<AppState>, jar: CookieJar, Form(form): Form<RegionForm>) -> Response {
    let (sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    if let Err(e) = planner::choose_region(&session, &state.api, &form.region).await {
        push_flash(&state, &sid, e.user_message());
    }
    redirect_to_planner(&session).into_response()
}

pub async fn dates_post(State(state): State<AppState>, jar: CookieJar, Form(form): Form<DatesForm>) -> Response {
    let (sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    match (optional_date(&form.start_date), optional_date(&form.end_date)) {
        (Ok(start), Ok(end)) => lock(&session).set_dates(start, end),
        (Err(e), _) | (_, Err(e)) => push_flash(&state, &sid, e.user_message()),
    }
    redirect_to_planner(&session).into_response()
}

pub async fn theme_post(State(state): State<AppState>, jar: CookieJar, Form(form): Form<ThemeForm>) -> Response {
    let (sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    let raw = form.theme.trim();
    if raw.is_empty() {
        lock(&session).set_theme(None);
    } else {
        match raw.parse::<Theme>() {
            Ok(theme) => lock(&session).set_theme(Some(theme)),
            Err(e) => push_flash(&state, &sid, e),
        }
    }
    redirect_to_planner(&session).into_response()
}

pub async fn landmark_post(State(state): State<AppState>, jar: CookieJar, Form(form): Form<LandmarkForm>) -> Response {
    let (sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    let opened = lock(&session).select_landmark(form.landmark_id);
    if let Err(e) = opened {
        push_flash(&state, &sid, e.user_message());
    }
    redirect_to_planner(&session).into_response()
}

pub async fn landmark_close_post(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (_sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    lock(&session).close_landmark();
    redirect_to_planner(&session).into_response()
}

pub async fn checklist_add_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LandmarkForm>,
) -> Response {
    let (sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    let added = lock(&session).add_landmark(form.landmark_id);
    match added {
        Ok(true) => {}
        Ok(false) => push_flash(&state, &sid, "That landmark is already on your checklist."),
        Err(e) => push_flash(&state, &sid, e.user_message()),
    }
    redirect_to_planner(&session).into_response()
}

pub async fn checklist_remove_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ChecklistRemoveForm>,
) -> Response {
    let (_sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    lock(&session).remove_from_checklist(&form.key);
    redirect_to_planner(&session).into_response()
}

pub async fn weather_post(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    if let Err(e) = planner::refresh_weather(&session, &state.api).await {
        push_flash(&state, &sid, e.user_message());
    }
    redirect_to_planner(&session).into_response()
}

pub async fn generate_post(State(state): State<AppState>, jar: CookieJar) -> Response {
    let (sid, session) = match posted_session(&state, &jar) {
        Ok(s) => s,
        Err(r) => return r.into_response(),
    };
    match planner::generate(&session, &state.api).await {
        Ok(_) => Redirect::to("/report").into_response(),
        Err(e) => {
            push_flash(&state, &sid, e.user_message());
            redirect_to_planner(&session).into_response()
        }
    }
}
