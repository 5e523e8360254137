use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{ChecklistItem, CountryCode, Theme};

/// Snapshot passed from the planning page to the report page after a
/// successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHandoff {
    pub itinerary_id: Option<i64>,
    pub country_code: CountryCode,
    pub country_label: String,
    pub region_key: String,
    pub region_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub checklist: Vec<ChecklistItem>,
    pub theme: Theme,
}
