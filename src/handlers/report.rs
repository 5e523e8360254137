use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::{csv_filename, download_csv};
use crate::error::PlanError;
use crate::models::{AppState, ReportView};
use crate::planner::lock;
use crate::report::load_report_page;
use crate::templates::{ReportEmptyTemplate, ReportTemplate};

use super::helpers::{existing_session, render_template, take_flash_messages};

pub async fn report_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let Some((sid, session)) = existing_session(&state, &jar) else {
        return render_template(ReportEmptyTemplate {
            flash_messages: Vec::new(),
        });
    };
    let handoff = lock(&session).handoff().cloned();
    let flash_messages = take_flash_messages(&state, &sid);
    match load_report_page(&state.api, handoff.as_ref()).await {
        Some(page) => render_template(ReportTemplate {
            flash_messages,
            view: ReportView::from(&page),
        }),
        None => render_template(ReportEmptyTemplate {
            flash_messages,
        }),
    }
}

/// Proxy the itinerary CSV as a file download.
pub async fn report_csv_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    let id = match existing_session(&state, &jar) {
        Some((_, session)) => {
            let s = lock(&session);
            s.handoff().and_then(|h| h.itinerary_id)
        }
        None => None,
    };
    let Some(id) = id else {
        return (StatusCode::NOT_FOUND, PlanError::MissingNavigationState.to_string()).into_response();
    };
    match download_csv(&state.api, id).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", csv_filename(id)),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(%e, itinerary_id = id, "CSV export failed");
            (StatusCode::BAD_GATEWAY, e.user_message()).into_response()
        }
    }
}
