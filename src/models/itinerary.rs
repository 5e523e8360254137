use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{CountryCode, Theme};

/// Body of `POST /api/itineraries/generate`. Built fresh at submission time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItineraryRequest {
    pub country_code: CountryCode,
    pub region_code: String,
    pub days: u32,
    pub start_date: NaiveDate,
    pub theme: Theme,
    pub selected_landmark_ids: Vec<i64>,
}

/// What the backend hands back after generation. Only `id` is relied on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedItinerary {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub days: Option<u32>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOverview {
    pub title: String,
    pub summary: String,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannedStop {
    pub name: String,
    pub reason: String,
    pub is_user_selected: bool,
    pub landmark_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DayPlan {
    pub day: u32,
    pub title: String,
    pub reason: String,
    pub landmarks: Vec<PlannedStop>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tips {
    pub packing: Vec<String>,
    pub local: Vec<String>,
}

/// Backend-generated narrative for one itinerary. Read-only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItineraryReport {
    pub overview: ReportOverview,
    pub daily_plan: Vec<DayPlan>,
    pub tips: Tips,
}
