//! Shaping a generated itinerary for display.

use std::collections::HashMap;

use crate::api::{self, ApiClient};
use crate::models::{ChecklistItem, ItineraryReport, Overview};
use crate::planner::ReportHandoff;

/// Where a user-picked landmark ended up in the generated plan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledVisit {
    pub day: u32,
    pub day_title: String,
    pub reason: String,
}

/// Map landmark id to the first day that schedules it as a user pick.
/// Later placements of the same id are ignored.
pub fn landmark_lookup(report: &ItineraryReport) -> HashMap<i64, ScheduledVisit> {
    let mut out = HashMap::new();
    for day in &report.daily_plan {
        for stop in day.landmarks.iter().filter(|s| s.is_user_selected) {
            if let Some(id) = stop.landmark_id {
                out.entry(id).or_insert_with(|| ScheduledVisit {
                    day: day.day,
                    day_title: day.title.clone(),
                    reason: stop.reason.clone(),
                });
            }
        }
    }
    out
}

/// Outcome of one of the report page's independent fetches.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched<T> {
    Ready(T),
    Failed(String),
    /// Nothing to fetch (no itinerary id).
    Skipped,
}

impl<T> Fetched<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Fetched::Ready(v) => Some(v),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetched::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistPlacement {
    pub item: ChecklistItem,
    pub scheduled: Option<ScheduledVisit>,
}

#[derive(Debug, Clone)]
pub struct ReportPage {
    pub handoff: ReportHandoff,
    pub report: Fetched<ItineraryReport>,
    pub travel: Fetched<Overview>,
    pub placements: Vec<ChecklistPlacement>,
    pub csv_filename: Option<String>,
}

impl ReportPage {
    pub fn build(handoff: ReportHandoff, report: Fetched<ItineraryReport>, travel: Fetched<Overview>) -> Self {
        let lookup = report.ready().map(landmark_lookup).unwrap_or_default();
        let placements = handoff
            .checklist
            .iter()
            .map(|item| ChecklistPlacement {
                item: item.clone(),
                scheduled: lookup.get(&item.id).cloned(),
            })
            .collect();
        let csv_filename = handoff.itinerary_id.map(api::csv_filename);
        ReportPage {
            handoff,
            report,
            travel,
            placements,
            csv_filename,
        }
    }
}

/// Fetch the report and the region's travel overview side by side.
/// Returns `None` without touching the network when there is no handoff.
pub async fn load_report_page(api: &ApiClient, handoff: Option<&ReportHandoff>) -> Option<ReportPage> {
    let handoff = handoff?.clone();
    let report_fut = async {
        match handoff.itinerary_id {
            Some(id) => match api::load_report(api, id).await {
                Ok(r) => Fetched::Ready(r),
                Err(e) => Fetched::Failed(e.user_message()),
            },
            None => Fetched::Skipped,
        }
    };
    let travel_fut = async {
        match api::load_overview(api, handoff.country_code, &handoff.region_key).await {
            Ok(o) => Fetched::Ready(o),
            Err(e) => Fetched::Failed(e.user_message()),
        }
    };
    let (report, travel) = tokio::join!(report_fut, travel_fut);
    Some(ReportPage::build(handoff, report, travel))
}
