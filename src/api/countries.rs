use serde::Deserialize;

use super::client::ApiClient;
use crate::catalog::fallback_countries;
use crate::error::ApiError;
use crate::models::{Country, CountryCode};

#[derive(Deserialize)]
struct RawCountry {
    code: String,
    name: String,
}

/// Load the supported countries. Codes outside the fixed set are skipped.
pub async fn load_countries(api: &ApiClient) -> Result<Vec<Country>, ApiError> {
    let raw: Vec<RawCountry> = api.get_json("/api/countries", &[]).await?;
    let mut out = Vec::new();
    for c in raw {
        match c.code.parse::<CountryCode>() {
            Ok(code) => out.push(Country { code, label: c.name }),
            Err(e) => tracing::debug!(%e, "Skipping country"),
        }
    }
    Ok(out)
}

/// Like [`load_countries`] but never fails: on error (or an empty answer)
/// the built-in list is returned together with the error, if any.
pub async fn load_countries_or_fallback(api: &ApiClient) -> (Vec<Country>, Option<ApiError>) {
    match load_countries(api).await {
        Ok(list) if !list.is_empty() => (list, None),
        Ok(_) => (fallback_countries(), None),
        Err(e) => {
            tracing::warn!(%e, "Falling back to built-in country list");
            (fallback_countries(), Some(e))
        }
    }
}
