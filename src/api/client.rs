use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use yansi::Paint;

use crate::config::Settings;
use crate::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(true);

/// Toggle the colourised `curl` echo of outbound requests (CLI only).
pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        eprintln!("{}", msg);
    }
}

/// Thin wrapper around a shared `reqwest::Client` bound to the backend root.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("TripTailor/{}", env!("CARGO_PKG_VERSION")))
            .timeout(settings.request_timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self::with_client(http, &settings.api_base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: crate::config::sanitize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let resp = self.get(endpoint, params).await?;
        decode_body(resp).await
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let json = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        log_curl("POST", &url, Some(&json));
        tracing::info!(%url, "POST");
        let resp = self
            .http
            .post(&url)
            .json(&json)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        decode_body(check_status(resp).await?).await
    }

    /// GET that only checks the status, leaving the body to the caller
    /// (used for streamed downloads).
    pub async fn get(&self, endpoint: &str, params: &[(&str, String)]) -> Result<reqwest::Response, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        log_curl("GET", &url_with_query(&url, params), None);
        tracing::info!(%url, ?params, "GET");
        let resp = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;
        check_status(resp).await
    }
}

async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    let detail = error_detail(&body);
    tracing::warn!(status = status.as_u16(), %detail, "Backend returned an error status");
    Err(ApiError::Status {
        status: status.as_u16(),
        detail,
    })
}

async fn decode_body<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
    let bytes = resp.bytes().await.map_err(ApiError::from_reqwest)?;
    let response_str = String::from_utf8_lossy(&bytes).to_string();
    log_output(format!("Response:\n{}", Paint::new(response_str).rgb(100, 100, 100)));
    serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Pull the human-readable message out of an error body. The backend
/// answers `{"detail": "..."}`; validation errors carry a list instead.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => match v.get("detail") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        Err(_) => body.trim().chars().take(200).collect(),
    }
}

fn url_with_query(url: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    let query_string = params
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<String>>()
        .join("&");
    format!("{}?{}", url, query_string)
}

fn log_curl(method: &str, url: &str, body: Option<&serde_json::Value>) {
    if SILENT.load(Ordering::Relaxed) {
        return;
    }
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));
    if let Some(d) = body {
        parts.push(format!(
            "{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
        ));
        let json_str = serde_json::to_string(d).unwrap_or_default();
        let escaped_json = json_str.replace('\'', "'\\''");
        parts.push(format!(
            "{} {}",
            Paint::new("-d").fg(yansi::Color::Blue),
            Paint::new(format!("'{}'", escaped_json)).fg(yansi::Color::White)
        ));
    }
    log_output(format!("Request:\n{}", parts.join(" ")));
}
