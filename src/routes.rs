use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

// Embedded default stylesheet, replaced by `--stylesheet` when given.
const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

async fn styles_get(State(state): State<AppState>) -> Response {
    let css = state
        .custom_css
        .unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], css).into_response()
}

pub fn build_router(state: AppState) -> Router {
    let assets = Router::new()
        .route("/styles.css", get(styles_get))
        .layer(ServiceBuilder::new().layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=3600"),
        )));

    Router::new()
        .route("/", get(handlers::home_get))
        .route("/main", get(handlers::main_get))
        .route("/main/region", post(handlers::region_post))
        .route("/main/dates", post(handlers::dates_post))
        .route("/main/theme", post(handlers::theme_post))
        .route("/main/landmark", post(handlers::landmark_post))
        .route("/main/landmark/close", post(handlers::landmark_close_post))
        .route("/main/checklist/add", post(handlers::checklist_add_post))
        .route("/main/checklist/remove", post(handlers::checklist_remove_post))
        .route("/main/weather", post(handlers::weather_post))
        .route("/main/generate", post(handlers::generate_post))
        .route("/report", get(handlers::report_get))
        .route("/report/csv", get(handlers::report_csv_get))
        .nest("/static", assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
