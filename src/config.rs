use std::env;
use std::path::Path;
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5173;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Snapshot of the runtime configuration, taken once at start-up.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: String,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_env(env_file: Option<&str>) -> Self {
        load_env_file(env_file);
        Settings {
            api_base_url: get_api_base_url(),
            request_timeout: get_request_timeout(),
        }
    }
}

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_default())
}

pub fn get_request_timeout() -> Duration {
    Duration::from_secs(parse_timeout_secs(&env::var("API_TIMEOUT_SECS").unwrap_or_default()))
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn parse_timeout_secs(raw: &str) -> u64 {
    match raw.trim().parse::<u64>() {
        Ok(0) | Err(_) => DEFAULT_TIMEOUT_SECS,
        Ok(n) => n,
    }
}
