use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;

use crate::api::load_countries_or_fallback;
use crate::catalog;
use crate::models::{AppState, CountryCard};
use crate::templates::HomeTemplate;

use super::helpers::{existing_session, render_template, take_flash_messages};

pub async fn home_get(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let flash_messages = existing_session(&state, &jar)
        .map(|(sid, _)| take_flash_messages(&state, &sid))
        .unwrap_or_default();
    let (countries, error) = load_countries_or_fallback(&state.api).await;
    let notice = error.map(|e| format!("{} Showing the built-in country list.", e.user_message()));
    let page = HomeTemplate {
        flash_messages,
        countries: countries
            .into_iter()
            .map(|c| CountryCard {
                code: c.code.as_str().to_string(),
                label: catalog::country_label(c.code).to_string(),
                native_label: catalog::country_meta(c.code).native_label.to_string(),
            })
            .collect(),
        notice,
    };
    render_template(page)
}
