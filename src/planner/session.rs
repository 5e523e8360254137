//! Per-visitor planning state machine.
//!
//! Every network fetch is split into a `begin_*` call that hands out a
//! [`Ticket`] and an `apply_*` call that writes the result back. A result
//! whose ticket has been superseded (the user changed country, region or
//! dates in the meantime) is dropped, so a late response can never
//! overwrite newer state.

use chrono::NaiveDate;

use super::handoff::ReportHandoff;
use super::request::build_request;
use super::selection::Selection;
use super::sequence::{Slot, SlotSequencer, Ticket};
use crate::catalog;
use crate::error::{ApiError, PlanError};
use crate::models::{CountryCode, Forecast, GeneratedItinerary, ItineraryRequest, Landmark, Overview, Region, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NoSelection,
    RegionsLoaded,
    OverviewLoaded,
    Generating,
    ReportReady,
    GenerateFailed,
}

#[derive(Debug, Clone, PartialEq)]
enum Generation {
    Idle,
    /// Carries the hand-off for the submitted selection, id still unset.
    InFlight(Box<ReportHandoff>),
    Succeeded,
    Failed(String),
}

/// Parameters of a forecast lookup, captured when the fetch starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherQuery {
    pub lat: f64,
    pub lon: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct PlanningSession {
    selection: Selection,
    regions: Vec<Region>,
    overview: Option<Overview>,
    forecast: Option<Forecast>,
    regions_error: Option<String>,
    overview_error: Option<String>,
    weather_error: Option<String>,
    generation: Generation,
    handoff: Option<ReportHandoff>,
    sequencer: SlotSequencer,
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningSession {
    pub fn new() -> Self {
        Self {
            selection: Selection::default(),
            regions: Vec::new(),
            overview: None,
            forecast: None,
            regions_error: None,
            overview_error: None,
            weather_error: None,
            generation: Generation::Idle,
            handoff: None,
            sequencer: SlotSequencer::default(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn current_region(&self) -> Option<&Region> {
        let code = self.selection.region.as_deref()?;
        self.regions.iter().find(|r| r.code == code)
    }

    pub fn overview(&self) -> Option<&Overview> {
        self.overview.as_ref()
    }

    pub fn forecast(&self) -> Option<&Forecast> {
        self.forecast.as_ref()
    }

    pub fn regions_error(&self) -> Option<&str> {
        self.regions_error.as_deref()
    }

    pub fn overview_error(&self) -> Option<&str> {
        self.overview_error.as_deref()
    }

    pub fn weather_error(&self) -> Option<&str> {
        self.weather_error.as_deref()
    }

    pub fn generation_error(&self) -> Option<&str> {
        match &self.generation {
            Generation::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_generating(&self) -> bool {
        matches!(self.generation, Generation::InFlight(_))
    }

    pub fn handoff(&self) -> Option<&ReportHandoff> {
        self.handoff.as_ref()
    }

    pub fn selected_landmark(&self) -> Option<&Landmark> {
        let id = self.selection.selected_landmark?;
        self.overview.as_ref()?.landmark(id)
    }

    pub fn can_generate(&self) -> bool {
        self.selection.can_generate()
    }

    pub fn phase(&self) -> Phase {
        match self.generation {
            Generation::InFlight(_) => Phase::Generating,
            Generation::Succeeded => Phase::ReportReady,
            Generation::Failed(_) => Phase::GenerateFailed,
            Generation::Idle if self.overview.is_some() => Phase::OverviewLoaded,
            Generation::Idle if !self.regions.is_empty() => Phase::RegionsLoaded,
            Generation::Idle => Phase::NoSelection,
        }
    }

    // A finished generation belongs to the selection it was built from.
    fn touch(&mut self) {
        if self.generation == Generation::Succeeded {
            self.generation = Generation::Idle;
        }
    }

    fn clear_region_data(&mut self) {
        self.overview = None;
        self.overview_error = None;
        self.forecast = None;
        self.weather_error = None;
        self.sequencer.invalidate(Slot::Overview);
        self.sequencer.invalidate(Slot::Weather);
    }

    /// Returns `false` when `code` is already the selected country.
    pub fn set_country(&mut self, code: CountryCode) -> bool {
        if self.selection.country == Some(code) {
            return false;
        }
        tracing::debug!(country = %code, "Country changed");
        self.selection.set_country(code);
        self.regions.clear();
        self.regions_error = None;
        self.sequencer.invalidate(Slot::Regions);
        self.clear_region_data();
        self.touch();
        true
    }

    pub fn set_region(&mut self, code: &str) -> Result<bool, PlanError> {
        if self.selection.region.as_deref() == Some(code) {
            return Ok(false);
        }
        if !self.regions.iter().any(|r| r.code == code) {
            return Err(PlanError::UnknownRegion(code.to_string()));
        }
        tracing::debug!(region = %code, "Region changed");
        self.selection.set_region(Some(code.to_string()));
        self.clear_region_data();
        self.touch();
        Ok(true)
    }

    fn invalidate_forecast(&mut self) {
        self.forecast = None;
        self.weather_error = None;
        self.sequencer.invalidate(Slot::Weather);
        self.touch();
    }

    pub fn set_start_date(&mut self, start: Option<NaiveDate>) {
        self.selection.set_start_date(start);
        self.invalidate_forecast();
    }

    pub fn set_end_date(&mut self, end: Option<NaiveDate>) {
        self.selection.set_end_date(end);
        self.invalidate_forecast();
    }

    pub fn set_dates(&mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) {
        self.selection.set_start_date(start);
        self.selection.set_end_date(end);
        self.invalidate_forecast();
    }

    pub fn set_theme(&mut self, theme: Option<Theme>) {
        self.selection.set_theme(theme);
        self.touch();
    }

    pub fn select_landmark(&mut self, id: i64) -> Result<(), PlanError> {
        if self.overview.as_ref().and_then(|o| o.landmark(id)).is_none() {
            return Err(PlanError::UnknownLandmark(id));
        }
        self.selection.selected_landmark = Some(id);
        Ok(())
    }

    pub fn close_landmark(&mut self) {
        self.selection.selected_landmark = None;
    }

    /// Check a landmark of the current region. `Ok(false)` when it was
    /// already on the checklist.
    pub fn add_landmark(&mut self, id: i64) -> Result<bool, PlanError> {
        let region = self.current_region().ok_or(PlanError::NoRegionSelected)?;
        let (code, label) = (region.code.clone(), region.name.clone());
        let landmark = self
            .overview
            .as_ref()
            .and_then(|o| o.landmark(id))
            .cloned()
            .ok_or(PlanError::UnknownLandmark(id))?;
        let added = self.selection.add_to_checklist(&code, &label, &landmark);
        if added {
            self.touch();
        }
        Ok(added)
    }

    pub fn remove_from_checklist(&mut self, key: &str) -> bool {
        let removed = self.selection.remove_from_checklist(key);
        if removed {
            self.touch();
        }
        removed
    }

    pub fn begin_regions(&mut self) -> Option<(Ticket, CountryCode)> {
        let country = self.selection.country?;
        Some((self.sequencer.issue(Slot::Regions), country))
    }

    /// On failure the list is emptied and the error kept for display.
    /// Either way the region falls back to the first listed one when the
    /// current choice is not in the new list.
    pub fn apply_regions(&mut self, ticket: Ticket, result: Result<Vec<Region>, ApiError>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        match result {
            Ok(list) => {
                self.regions = list;
                self.regions_error = None;
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load regions");
                self.regions.clear();
                self.regions_error = Some(e.user_message());
            }
        }
        let still_listed = self
            .selection
            .region
            .as_deref()
            .map(|code| self.regions.iter().any(|r| r.code == code))
            .unwrap_or(false);
        if !still_listed {
            let fallback = self.regions.first().map(|r| r.code.clone());
            if fallback != self.selection.region {
                self.selection.set_region(fallback);
                self.clear_region_data();
            }
        }
        true
    }

    pub fn begin_overview(&mut self) -> Option<(Ticket, CountryCode, String)> {
        let country = self.selection.country?;
        let region = self.selection.region.clone()?;
        Some((self.sequencer.issue(Slot::Overview), country, region))
    }

    pub fn apply_overview(&mut self, ticket: Ticket, result: Result<Overview, ApiError>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        match result {
            Ok(overview) => {
                self.overview = Some(overview);
                self.overview_error = None;
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load overview");
                self.overview = None;
                self.overview_error = Some(e.user_message());
            }
        }
        true
    }

    pub fn begin_weather(&mut self) -> Result<(Ticket, WeatherQuery), PlanError> {
        let region = self.current_region().ok_or(PlanError::NoRegionSelected)?;
        let (lat, lon) = (region.lat, region.lon);
        let (start_date, end_date) = match (self.selection.dates.start, self.selection.dates.end) {
            (Some(s), Some(e)) => (s, e),
            _ => return Err(PlanError::NotReady),
        };
        let ticket = self.sequencer.issue(Slot::Weather);
        Ok((ticket, WeatherQuery { lat, lon, start_date, end_date }))
    }

    pub fn apply_weather(&mut self, ticket: Ticket, result: Result<Forecast, ApiError>) -> bool {
        if !self.accept(ticket) {
            return false;
        }
        match result {
            Ok(forecast) => {
                self.forecast = Some(forecast);
                self.weather_error = None;
            }
            Err(e) => {
                tracing::warn!(%e, "Failed to load forecast");
                self.forecast = None;
                self.weather_error = Some(e.user_message());
            }
        }
        true
    }

    fn accept(&self, ticket: Ticket) -> bool {
        let current = self.sequencer.is_current(ticket);
        if !current {
            tracing::warn!(slot = ?ticket.slot(), "Discarding stale response");
        }
        current
    }

    /// Mark a generation as in flight and return the request to submit.
    /// Any previous failure message is dropped here. The report hand-off
    /// is captured now, so edits made while the request is outstanding do
    /// not leak into the report of the trip that was actually sent.
    pub fn begin_generation(&mut self) -> Result<ItineraryRequest, PlanError> {
        if self.is_generating() {
            return Err(PlanError::AlreadyGenerating);
        }
        if !self.can_generate() {
            return Err(PlanError::NotReady);
        }
        let request = build_request(&self.selection)?;
        let pending = self.snapshot()?;
        self.generation = Generation::InFlight(Box::new(pending));
        Ok(request)
    }

    /// Clear the in-flight flag and record the outcome.
    pub fn finish_generation(&mut self, result: Result<GeneratedItinerary, ApiError>) -> Result<ReportHandoff, PlanError> {
        let pending = match std::mem::replace(&mut self.generation, Generation::Idle) {
            Generation::InFlight(pending) => pending,
            other => {
                self.generation = other;
                return Err(PlanError::NotReady);
            }
        };
        match result {
            Ok(created) => {
                let mut handoff = *pending;
                handoff.itinerary_id = Some(created.id);
                self.generation = Generation::Succeeded;
                self.handoff = Some(handoff.clone());
                tracing::info!(itinerary_id = created.id, "Itinerary generated");
                Ok(handoff)
            }
            Err(e) => {
                tracing::warn!(%e, "Itinerary generation failed");
                self.generation = Generation::Failed(e.user_message());
                Err(PlanError::Api(e))
            }
        }
    }

    /// Drop the in-flight flag without recording an outcome.
    pub fn abandon_generation(&mut self) {
        if self.is_generating() {
            self.generation = Generation::Idle;
        }
    }

    fn snapshot(&self) -> Result<ReportHandoff, PlanError> {
        let country = self.selection.country.ok_or(PlanError::NoRegionSelected)?;
        let region_key = self.selection.region.clone().unwrap_or_default();
        let region_label = self
            .current_region()
            .map(|r| r.name.clone())
            .unwrap_or_else(|| region_key.clone());
        let (start_date, end_date) = match (self.selection.dates.start, self.selection.dates.end) {
            (Some(s), Some(e)) => (s, e),
            _ => return Err(PlanError::NotReady),
        };
        Ok(ReportHandoff {
            itinerary_id: None,
            country_code: country,
            country_label: catalog::country_label(country).to_string(),
            region_key,
            region_label,
            start_date,
            end_date,
            checklist: self.selection.checklist.items().to_vec(),
            theme: self.selection.effective_theme().unwrap_or_else(|| catalog::default_theme(country)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::parse_date;

    fn region(code: &str, name: &str) -> Region {
        Region {
            code: code.into(),
            name: name.into(),
            lat: 35.0,
            lon: 139.0,
            country_code: CountryCode::Japan,
        }
    }

    fn landmark(id: i64, name: &str) -> Landmark {
        Landmark {
            id,
            name: name.into(),
            description: String::new(),
            lat: 0.0,
            lng: 0.0,
            long_description: None,
            highlights: vec![],
            best_time: None,
            recommended_duration: None,
            local_tip: None,
        }
    }

    fn overview(ids: &[i64]) -> Overview {
        Overview {
            landmarks: ids.iter().map(|id| landmark(*id, &format!("L{}", id))).collect(),
            ..Default::default()
        }
    }

    /// Japan selected, regions loaded, Tokyo's overview in place.
    fn loaded_session() -> PlanningSession {
        let mut s = PlanningSession::new();
        s.set_country(CountryCode::Japan);
        let (t, _) = s.begin_regions().unwrap();
        s.apply_regions(t, Ok(vec![region("tokyo", "Tokyo"), region("osaka", "Osaka")]));
        let (t, _, _) = s.begin_overview().unwrap();
        s.apply_overview(t, Ok(overview(&[1, 2, 3])));
        s
    }

    fn ready_session() -> PlanningSession {
        let mut s = loaded_session();
        s.set_dates(Some(parse_date("2024-05-01").unwrap()), Some(parse_date("2024-05-03").unwrap()));
        s.add_landmark(2).unwrap();
        s
    }

    #[test]
    fn phases_follow_loading() {
        let mut s = PlanningSession::new();
        assert_eq!(s.phase(), Phase::NoSelection);
        s.set_country(CountryCode::Japan);
        let (t, country) = s.begin_regions().unwrap();
        assert_eq!(country, CountryCode::Japan);
        s.apply_regions(t, Ok(vec![region("tokyo", "Tokyo")]));
        assert_eq!(s.phase(), Phase::RegionsLoaded);
        let (t, _, region_code) = s.begin_overview().unwrap();
        assert_eq!(region_code, "tokyo");
        s.apply_overview(t, Ok(overview(&[1])));
        assert_eq!(s.phase(), Phase::OverviewLoaded);
    }

    #[test]
    fn first_region_is_selected_when_none_matches() {
        let s = loaded_session();
        assert_eq!(s.selection().region.as_deref(), Some("tokyo"));
    }

    #[test]
    fn stale_region_list_from_previous_country_is_discarded() {
        let mut s = PlanningSession::new();
        s.set_country(CountryCode::Japan);
        let (jp_ticket, _) = s.begin_regions().unwrap();
        s.set_country(CountryCode::Thailand);
        let (th_ticket, _) = s.begin_regions().unwrap();

        assert!(s.apply_regions(th_ticket, Ok(vec![region("bangkok", "Bangkok")])));
        assert!(!s.apply_regions(jp_ticket, Ok(vec![region("tokyo", "Tokyo")])));

        assert_eq!(s.regions().len(), 1);
        assert_eq!(s.regions()[0].code, "bangkok");
        assert_eq!(s.selection().region.as_deref(), Some("bangkok"));
    }

    #[test]
    fn failed_region_load_empties_list_and_keeps_message() {
        let mut s = loaded_session();
        let (t, _) = s.begin_regions().unwrap();
        s.apply_regions(t, Err(ApiError::Status { status: 404, detail: "unsupported country".into() }));
        assert!(s.regions().is_empty());
        assert_eq!(s.selection().region, None);
        assert_eq!(s.regions_error(), Some("unsupported country"));
        assert!(s.overview().is_none());
    }

    #[test]
    fn switching_region_clears_overview_forecast_and_detail() {
        let mut s = ready_session();
        s.select_landmark(1).unwrap();
        let (t, _) = s.begin_weather().unwrap();
        s.apply_weather(
            t,
            Ok(Forecast {
                start_date: parse_date("2024-05-01").unwrap(),
                end_date: parse_date("2024-05-03").unwrap(),
                daily: vec![],
            }),
        );
        assert!(s.forecast().is_some());

        assert!(s.set_region("osaka").unwrap());
        assert!(s.overview().is_none());
        assert!(s.forecast().is_none());
        assert!(s.selected_landmark().is_none());
        assert_eq!(s.selection().checklist.len(), 1);
    }

    #[test]
    fn unknown_region_is_rejected() {
        let mut s = loaded_session();
        assert_eq!(s.set_region("paris"), Err(PlanError::UnknownRegion("paris".into())));
    }

    #[test]
    fn late_overview_for_previous_region_is_dropped() {
        let mut s = loaded_session();
        let (tokyo_ticket, _, _) = s.begin_overview().unwrap();
        s.set_region("osaka").unwrap();
        let (osaka_ticket, _, _) = s.begin_overview().unwrap();
        assert!(s.apply_overview(osaka_ticket, Ok(overview(&[7]))));
        assert!(!s.apply_overview(tokyo_ticket, Ok(overview(&[1]))));
        assert!(s.overview().unwrap().landmark(7).is_some());
    }

    #[test]
    fn date_change_discards_in_flight_forecast() {
        let mut s = ready_session();
        let (t, query) = s.begin_weather().unwrap();
        assert_eq!(query.lat, 35.0);
        s.set_end_date(Some(parse_date("2024-05-05").unwrap()));
        let stale = Forecast {
            start_date: query.start_date,
            end_date: query.end_date,
            daily: vec![],
        };
        assert!(!s.apply_weather(t, Ok(stale)));
        assert!(s.forecast().is_none());
    }

    #[test]
    fn weather_needs_region_and_dates() {
        let mut s = loaded_session();
        assert_eq!(s.begin_weather().unwrap_err(), PlanError::NotReady);
        let mut empty = PlanningSession::new();
        assert_eq!(empty.begin_weather().unwrap_err(), PlanError::NoRegionSelected);
    }

    #[test]
    fn checklist_spans_regions() {
        let mut s = loaded_session();
        s.add_landmark(1).unwrap();
        s.set_region("osaka").unwrap();
        let (t, _, _) = s.begin_overview().unwrap();
        s.apply_overview(t, Ok(overview(&[1, 9])));
        assert!(s.add_landmark(1).unwrap());
        assert!(!s.add_landmark(1).unwrap());
        let keys: Vec<_> = s.selection().checklist.items().iter().map(|i| i.key.clone()).collect();
        assert_eq!(keys, vec!["tokyo-1", "osaka-1"]);
    }

    #[test]
    fn adding_unknown_landmark_fails() {
        let mut s = loaded_session();
        assert_eq!(s.add_landmark(99), Err(PlanError::UnknownLandmark(99)));
    }

    #[test]
    fn second_generation_while_in_flight_is_refused() {
        let mut s = ready_session();
        let req = s.begin_generation().unwrap();
        assert_eq!(req.days, 3);
        assert_eq!(req.selected_landmark_ids, vec![2]);
        assert_eq!(s.phase(), Phase::Generating);
        assert_eq!(s.begin_generation(), Err(PlanError::AlreadyGenerating));
    }

    #[test]
    fn generation_not_ready_without_checklist() {
        let mut s = loaded_session();
        s.set_dates(Some(parse_date("2024-05-01").unwrap()), Some(parse_date("2024-05-01").unwrap()));
        assert_eq!(s.begin_generation(), Err(PlanError::NotReady));
        assert!(!s.is_generating());
    }

    #[test]
    fn failure_clears_flag_and_keeps_message_until_next_attempt() {
        let mut s = ready_session();
        s.begin_generation().unwrap();
        let err = s.finish_generation(Err(ApiError::Timeout)).unwrap_err();
        assert_eq!(err, PlanError::Api(ApiError::Timeout));
        assert!(!s.is_generating());
        assert_eq!(s.phase(), Phase::GenerateFailed);
        assert!(s.generation_error().is_some());

        s.begin_generation().unwrap();
        assert!(s.generation_error().is_none());
    }

    #[test]
    fn success_produces_handoff_snapshot() {
        let mut s = ready_session();
        s.begin_generation().unwrap();
        let created = GeneratedItinerary { id: 41, title: None, days: Some(3), created_at: None };
        let handoff = s.finish_generation(Ok(created)).unwrap();
        assert_eq!(handoff.itinerary_id, Some(41));
        assert_eq!(handoff.country_label, "Japan");
        assert_eq!(handoff.region_key, "tokyo");
        assert_eq!(handoff.region_label, "Tokyo");
        assert_eq!(handoff.theme, Theme::Food);
        assert_eq!(handoff.checklist.len(), 1);
        assert_eq!(s.phase(), Phase::ReportReady);
        assert_eq!(s.handoff(), Some(&handoff));

        s.set_theme(Some(Theme::Nature));
        assert_eq!(s.phase(), Phase::OverviewLoaded);
        assert!(s.handoff().is_some());
    }

    #[test]
    fn handoff_reflects_submitted_selection_not_later_edits() {
        let mut s = ready_session();
        let req = s.begin_generation().unwrap();
        assert_eq!(req.start_date, parse_date("2024-05-01").unwrap());

        s.set_dates(Some(parse_date("2024-06-10").unwrap()), Some(parse_date("2024-06-20").unwrap()));
        assert!(s.remove_from_checklist("tokyo-2"));
        s.set_region("osaka").unwrap();

        let created = GeneratedItinerary { id: 7, title: None, days: Some(3), created_at: None };
        let handoff = s.finish_generation(Ok(created)).unwrap();
        assert_eq!(handoff.itinerary_id, Some(7));
        assert_eq!(handoff.start_date, parse_date("2024-05-01").unwrap());
        assert_eq!(handoff.end_date, parse_date("2024-05-03").unwrap());
        assert_eq!(handoff.region_key, "tokyo");
        assert_eq!(handoff.checklist.len(), 1);
        assert_eq!(handoff.checklist[0].key, "tokyo-2");
    }

    #[test]
    fn finishing_without_submission_is_rejected() {
        let mut s = ready_session();
        let created = GeneratedItinerary { id: 1, title: None, days: None, created_at: None };
        assert_eq!(s.finish_generation(Ok(created)), Err(PlanError::NotReady));
        assert!(s.handoff().is_none());
    }

    #[test]
    fn abandon_only_resets_in_flight() {
        let mut s = ready_session();
        s.begin_generation().unwrap();
        s.abandon_generation();
        assert!(!s.is_generating());
        assert!(s.generation_error().is_none());
    }
}
