use chrono::NaiveDate;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::Forecast;

/// Daily forecast for a coordinate over an inclusive date range.
/// Parameters are passed through untouched; the caller checks that a
/// region and both dates are chosen.
pub async fn load_forecast(
    api: &ApiClient,
    lat: f64,
    lon: f64,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Forecast, ApiError> {
    let params = [
        ("lat", lat.to_string()),
        ("lon", lon.to_string()),
        ("start_date", start_date.to_string()),
        ("end_date", end_date.to_string()),
    ];
    api.get_json("/api/weather/forecast", &params).await
}
