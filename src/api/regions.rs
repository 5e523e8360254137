use serde::Deserialize;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{CountryCode, Region};

#[derive(Deserialize)]
struct RawRegion {
    code: String,
    name: String,
    #[serde(default)]
    lat: f64,
    #[serde(default)]
    lon: f64,
    #[serde(default)]
    country_code: Option<String>,
}

/// Load the regions of one country, in backend order.
pub async fn load_regions(api: &ApiClient, country: CountryCode) -> Result<Vec<Region>, ApiError> {
    let params = [("country_code", country.as_str().to_string())];
    let raw: Vec<RawRegion> = api.get_json("/api/regions", &params).await?;
    Ok(raw
        .into_iter()
        .map(|r| Region {
            country_code: r
                .country_code
                .as_deref()
                .and_then(|c| c.parse().ok())
                .unwrap_or(country),
            code: r.code,
            name: r.name,
            lat: r.lat,
            lon: r.lon,
        })
        .collect())
}
