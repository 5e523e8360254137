use std::env;
use std::time::Duration;
use triptailor::config;

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(
        config::sanitize_base_url("http://planner.local:8000/"),
        "http://planner.local:8000"
    );
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(
        config::sanitize_base_url("http://planner.local:8000///"),
        "http://planner.local:8000"
    );
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(
        config::sanitize_base_url("  http://planner.local:8000/  "),
        "http://planner.local:8000"
    );
}

#[test]
fn test_sanitize_base_url_blank_uses_default() {
    assert_eq!(config::sanitize_base_url("   "), config::DEFAULT_API_BASE_URL);
}

#[test]
fn test_parse_timeout_secs() {
    assert_eq!(config::parse_timeout_secs("30"), 30);
    assert_eq!(config::parse_timeout_secs(" 5 "), 5);
    assert_eq!(config::parse_timeout_secs("0"), config::DEFAULT_TIMEOUT_SECS);
    assert_eq!(config::parse_timeout_secs("soon"), config::DEFAULT_TIMEOUT_SECS);
    assert_eq!(config::parse_timeout_secs(""), config::DEFAULT_TIMEOUT_SECS);
}

// Env vars are process-wide, so everything touching them lives in one test.
#[test]
fn test_settings_from_env_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("planner.env");
    std::fs::write(&path, "API_BASE_URL=http://backend.test:9000/\nAPI_TIMEOUT_SECS=3\n").unwrap();
    env::remove_var("API_BASE_URL");
    env::remove_var("API_TIMEOUT_SECS");

    let settings = config::Settings::from_env(Some(path.to_str().unwrap()));
    assert_eq!(settings.api_base_url, "http://backend.test:9000");
    assert_eq!(settings.request_timeout, Duration::from_secs(3));

    env::remove_var("API_BASE_URL");
    env::remove_var("API_TIMEOUT_SECS");
    assert_eq!(config::get_api_base_url(), config::DEFAULT_API_BASE_URL);
    assert_eq!(config::get_request_timeout(), Duration::from_secs(config::DEFAULT_TIMEOUT_SECS));
}
