//! In-process stand-in for the planning backend.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use triptailor::api::ApiClient;

#[derive(Clone, Default)]
pub struct Stub {
    pub hits: Arc<AtomicUsize>,
    pub generate_calls: Arc<AtomicUsize>,
    pub last_generate: Arc<Mutex<Option<Value>>>,
    pub generate_delay: Duration,
    pub generate_status: Option<u16>,
    /// Delay applied to the Japanese region list only.
    pub jp_regions_delay: Duration,
    pub countries_fail: bool,
}

impl Stub {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }
}

fn fail(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}

async fn countries(State(stub): State<Stub>) -> Response {
    stub.hit();
    if stub.countries_fail {
        return fail(StatusCode::INTERNAL_SERVER_ERROR, "db down");
    }
    Json(json!([
        { "code": "JP", "name": "일본" },
        { "code": "UK", "name": "영국" },
        { "code": "TH", "name": "태국" },
        { "code": "FR", "name": "프랑스" }
    ]))
    .into_response()
}

async fn regions(State(stub): State<Stub>, Query(q): Query<HashMap<String, String>>) -> Response {
    stub.hit();
    match q.get("country_code").map(String::as_str) {
        Some("JP") => {
            tokio::time::sleep(stub.jp_regions_delay).await;
            Json(json!([
                { "code": "fukuoka", "name": "Fukuoka", "lat": 33.59, "lon": 130.40, "country_code": "JP" },
                { "code": "osaka", "name": "Osaka", "lat": 34.69, "lon": 135.50, "country_code": "JP" }
            ]))
            .into_response()
        }
        Some("UK") => Json(json!([
            { "code": "london", "name": "London", "lat": 51.50, "lon": -0.12, "country_code": "UK" }
        ]))
        .into_response(),
        Some("TH") => Json(json!([])).into_response(),
        _ => fail(StatusCode::UNPROCESSABLE_ENTITY, "unknown country"),
    }
}

async fn overview(State(stub): State<Stub>, Query(q): Query<HashMap<String, String>>) -> Response {
    stub.hit();
    match q.get("region_code").map(String::as_str) {
        Some("fukuoka") => Json(json!({
            "landmarks": [
                {
                    "id": 3,
                    "name": "Canal City",
                    "description": "Shopping complex",
                    "description_long": "A canal runs through it.",
                    "highlight_points": "- fountain show\n- ramen stadium",
                    "latitude": 33.589,
                    "longitude": 130.411
                },
                { "id": 8, "name": "Ohori Park", "description": "Lake park", "lat": 33.586, "lng": 130.376,
                  "highlight_points": ["lake", "  ", "japanese garden"] }
            ],
            "restaurants": [
                { "id": 1, "name": "Ichiran", "rating": 4.5, "signature_menu": "Tonkotsu ramen" }
            ]
        }))
        .into_response(),
        Some("london") => Json(json!({
            "landmarks": [{ "id": 2, "name": "Big Ben", "lat": 51.5, "lng": -0.12 }],
            "museums": [{ "id": 4, "name": "British Museum", "opening_info": "10:00-17:00" }]
        }))
        .into_response(),
        _ => fail(StatusCode::NOT_FOUND, "Region not found"),
    }
}

async fn forecast(State(stub): State<Stub>, Query(q): Query<HashMap<String, String>>) -> Response {
    stub.hit();
    let start = q.get("start_date").cloned().unwrap_or_default();
    let end = q.get("end_date").cloned().unwrap_or_default();
    Json(json!({
        "start_date": start,
        "end_date": end,
        "daily": [
            { "date": start, "status": "Sunny", "icon_type": "sunny", "temperature_max": 24.0, "temperature_min": 15.5 },
            { "date": end, "status": "Rain", "icon_type": "rainy", "temperature_max": 19.0, "temperature_min": 14.0 }
        ]
    }))
    .into_response()
}

async fn generate(State(stub): State<Stub>, Json(body): Json<Value>) -> Response {
    stub.hit();
    stub.generate_calls.fetch_add(1, Ordering::SeqCst);
    *stub.last_generate.lock().unwrap() = Some(body);
    tokio::time::sleep(stub.generate_delay).await;
    if let Some(status) = stub.generate_status {
        let status = StatusCode::from_u16(status).unwrap();
        return fail(status, "generator unavailable");
    }
    Json(json!({ "id": 42, "title": "Fukuoka in 3 days", "days": 3 })).into_response()
}

async fn report(State(stub): State<Stub>, Path(id): Path<i64>) -> Response {
    stub.hit();
    if id != 42 {
        return fail(StatusCode::NOT_FOUND, "Itinerary not found");
    }
    Json(json!({
        "detail": {
            "overview": {
                "title": "Fukuoka food trail",
                "summary": "Three days of ramen and parks.",
                "highlights": ["Yatai stalls"]
            },
            "daily_plan": [
                {
                    "day": 1,
                    "title": "City centre",
                    "reason": "Close to the station",
                    "landmarks": [
                        { "name": "Canal City", "reason": "You picked it", "is_user_selected": true, "landmark_id": 3 },
                        { "name": "Nakasu", "reason": "Night stalls", "is_user_selected": false }
                    ]
                }
            ],
            "tips": { "packing": ["Umbrella"], "local": ["Carry cash"] }
        }
    }))
    .into_response()
}

pub const CSV_BODY: &str = "day,landmark\n1,Canal City\n";

async fn csv(State(stub): State<Stub>, Path(id): Path<i64>) -> Response {
    stub.hit();
    if id != 42 {
        return fail(StatusCode::NOT_FOUND, "Itinerary not found");
    }
    ([(header::CONTENT_TYPE, "text/csv")], CSV_BODY).into_response()
}

/// Serve `stub` on an ephemeral local port and return its base URL.
pub async fn spawn_backend(stub: Stub) -> String {
    let app = Router::new()
        .route("/api/countries", get(countries))
        .route("/api/regions", get(regions))
        .route("/api/travel/overview", get(overview))
        .route("/api/weather/forecast", get(forecast))
        .route("/api/itineraries/generate", post(generate))
        .route("/api/itineraries/:id/report", get(report))
        .route("/api/itineraries/:id/csv", get(csv))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn client_for(stub: &Stub) -> ApiClient {
    let base = spawn_backend(stub.clone()).await;
    ApiClient::with_client(reqwest::Client::new(), &base)
}

/// A client pointed at a port nothing listens on.
pub fn unreachable_client() -> ApiClient {
    ApiClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9")
}
