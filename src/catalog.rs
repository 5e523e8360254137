//! Immutable lookup tables, built once on first use and never mutated.
use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::models::{Country, CountryCode, Theme};

pub struct CountryMeta {
    pub label: &'static str,
    /// Name as the backend ships it.
    pub native_label: &'static str,
    pub default_theme: Theme,
    /// Heading for the country-specific supplementary list.
    pub recommendations_label: &'static str,
}

static COUNTRY_TABLE: Lazy<HashMap<CountryCode, CountryMeta>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert(
        CountryCode::Japan,
        CountryMeta {
            label: "Japan",
            native_label: "일본",
            default_theme: Theme::Food,
            recommendations_label: "Restaurants",
        },
    );
    m.insert(
        CountryCode::UnitedKingdom,
        CountryMeta {
            label: "United Kingdom",
            native_label: "영국",
            default_theme: Theme::Museum,
            recommendations_label: "Museums",
        },
    );
    m.insert(
        CountryCode::Thailand,
        CountryMeta {
            label: "Thailand",
            native_label: "태국",
            default_theme: Theme::Activity,
            recommendations_label: "Activities",
        },
    );
    m
});

static WEATHER_GLYPHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("sunny", "☀"),
        ("cloudy", "☁"),
        ("foggy", "🌫"),
        ("rainy", "☂"),
        ("snowy", "❄"),
        ("stormy", "⛈"),
        ("error", "?"),
    ])
});

pub fn country_meta(code: CountryCode) -> &'static CountryMeta {
    // Every variant is inserted above.
    &COUNTRY_TABLE[&code]
}

pub fn country_label(code: CountryCode) -> &'static str {
    country_meta(code).label
}

pub fn default_theme(code: CountryCode) -> Theme {
    country_meta(code).default_theme
}

/// Used when `GET /api/countries` is unavailable.
pub fn fallback_countries() -> Vec<Country> {
    CountryCode::ALL
        .iter()
        .map(|c| Country {
            code: *c,
            label: country_label(*c).to_string(),
        })
        .collect()
}

pub fn weather_glyph(icon_type: &str) -> &'static str {
    WEATHER_GLYPHS.get(icon_type).copied().unwrap_or("·")
}
