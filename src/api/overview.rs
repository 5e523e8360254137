use serde::Deserialize;

use super::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Activity, CountryCode, Landmark, Museum, Overview, Restaurant};

/// `highlight_points` arrives either as a list or as one newline-separated string.
#[derive(Deserialize)]
#[serde(untagged)]
enum Highlights {
    List(Vec<String>),
    Text(String),
}

impl Highlights {
    fn into_vec(self) -> Vec<String> {
        let raw = match self {
            Highlights::List(v) => v,
            Highlights::Text(s) => s.lines().map(str::to_string).collect(),
        };
        raw.into_iter()
            .map(|s| s.trim().trim_start_matches(['-', '•']).trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

#[derive(Deserialize)]
struct RawLandmark {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    description_long: Option<String>,
    #[serde(default)]
    highlight_points: Option<Highlights>,
    #[serde(default)]
    best_time: Option<String>,
    #[serde(default)]
    recommended_duration: Option<String>,
    #[serde(default)]
    local_tip: Option<String>,
    #[serde(default, alias = "latitude")]
    lat: Option<f64>,
    #[serde(default, alias = "longitude")]
    lng: Option<f64>,
}

#[derive(Deserialize)]
struct RawRestaurant {
    id: i64,
    name: String,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    signature_menu: Option<String>,
    #[serde(default)]
    opening_hours: Option<String>,
}

#[derive(Deserialize)]
struct RawActivity {
    id: i64,
    name: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawMuseum {
    id: i64,
    name: String,
    #[serde(default)]
    opening_info: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
struct RawOverview {
    #[serde(default)]
    landmarks: Vec<RawLandmark>,
    #[serde(default)]
    restaurants: Option<Vec<RawRestaurant>>,
    #[serde(default)]
    activities: Option<Vec<RawActivity>>,
    #[serde(default)]
    museums: Option<Vec<RawMuseum>>,
}

fn non_blank(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

impl From<RawLandmark> for Landmark {
    fn from(r: RawLandmark) -> Self {
        Landmark {
            id: r.id,
            name: r.name,
            description: r.description.unwrap_or_default(),
            lat: r.lat.unwrap_or_default(),
            lng: r.lng.unwrap_or_default(),
            long_description: non_blank(r.description_long),
            highlights: r.highlight_points.map(Highlights::into_vec).unwrap_or_default(),
            best_time: non_blank(r.best_time),
            recommended_duration: non_blank(r.recommended_duration),
            local_tip: non_blank(r.local_tip),
        }
    }
}

/// Decode an overview body into the canonical typed shape.
pub fn parse_overview(body: &str) -> Result<Overview, ApiError> {
    let raw: RawOverview = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(normalize(raw))
}

fn normalize(raw: RawOverview) -> Overview {
    Overview {
        landmarks: raw.landmarks.into_iter().map(Landmark::from).collect(),
        restaurants: raw
            .restaurants
            .unwrap_or_default()
            .into_iter()
            .map(|r| Restaurant {
                id: r.id,
                name: r.name,
                rating: r.rating,
                signature_menu: non_blank(r.signature_menu),
                opening_hours: non_blank(r.opening_hours),
            })
            .collect(),
        activities: raw
            .activities
            .unwrap_or_default()
            .into_iter()
            .map(|a| Activity {
                id: a.id,
                name: a.name,
                description: non_blank(a.description),
            })
            .collect(),
        museums: raw
            .museums
            .unwrap_or_default()
            .into_iter()
            .map(|m| Museum {
                id: m.id,
                name: m.name,
                opening_info: non_blank(m.opening_info),
                description: non_blank(m.description),
            })
            .collect(),
    }
}

/// Landmarks plus supplementary recommendations for one region.
pub async fn load_overview(api: &ApiClient, country: CountryCode, region_code: &str) -> Result<Overview, ApiError> {
    let params = [
        ("country_code", country.as_str().to_string()),
        ("region_code", region_code.to_string()),
    ];
    let raw: RawOverview = api.get_json("/api/travel/overview", &params).await?;
    Ok(normalize(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highlight_points_accept_list_or_text() {
        let body = r#"{
            "landmarks": [
                {"id": 1, "name": "Big Ben", "lat": 51.5, "lng": -0.12,
                 "highlight_points": ["Clock tower", " Gothic revival "]},
                {"id": 2, "name": "Tower Bridge", "lat": 51.5, "lng": -0.07,
                 "highlight_points": "- Glass floor\n\n- Bascule engine rooms"}
            ]
        }"#;
        let overview = parse_overview(body).unwrap();
        assert_eq!(overview.landmarks[0].highlights, vec!["Clock tower", "Gothic revival"]);
        assert_eq!(overview.landmarks[1].highlights, vec!["Glass floor", "Bascule engine rooms"]);
    }

    #[test]
    fn missing_country_lists_are_empty() {
        let overview = parse_overview(r#"{"landmarks": []}"#).unwrap();
        assert!(overview.restaurants.is_empty());
        assert!(overview.activities.is_empty());
        assert!(overview.museums.is_empty());
    }

    #[test]
    fn blank_extended_fields_become_none() {
        let body = r#"{"landmarks": [{"id": 4, "name": "Wat Arun", "description": null,
            "description_long": "  ", "local_tip": "Go at sunset", "latitude": 13.74, "longitude": 100.49}],
            "activities": [{"id": 1, "name": "Longtail boat", "region": "방콕"}]}"#;
        let overview = parse_overview(body).unwrap();
        let lm = &overview.landmarks[0];
        assert_eq!(lm.description, "");
        assert_eq!(lm.long_description, None);
        assert_eq!(lm.local_tip.as_deref(), Some("Go at sunset"));
        assert_eq!(lm.lat, 13.74);
        assert_eq!(overview.activities.len(), 1);
    }
}
