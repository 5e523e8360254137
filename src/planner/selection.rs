use chrono::NaiveDate;

use crate::catalog;
use crate::error::PlanError;
use crate::models::{Checklist, CountryCode, Landmark, Theme};

/// Accepts `YYYY-MM-DD`, the format both the date inputs and the backend use.
pub fn parse_date(raw: &str) -> Result<NaiveDate, PlanError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| PlanError::InvalidDate(raw.trim().to_string()))
}

/// Inclusive day count of a trip, never less than one.
pub fn calc_days(start: NaiveDate, end: NaiveDate) -> u32 {
    let days = (end - start).num_days() + 1;
    days.max(1) as u32
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }

    pub fn days(&self) -> Option<u32> {
        match (self.start, self.end) {
            (Some(s), Some(e)) => Some(calc_days(s, e)),
            _ => None,
        }
    }
}

/// The user's in-progress choices. Pure in-memory bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    pub country: Option<CountryCode>,
    pub region: Option<String>,
    pub dates: DateRange,
    pub checklist: Checklist,
    pub theme_override: Option<Theme>,
    /// Landmark whose detail panel is open.
    pub selected_landmark: Option<i64>,
}

impl Selection {
    /// Switching country drops the region and the open detail panel.
    /// The checklist itself survives.
    pub fn set_country(&mut self, code: CountryCode) {
        self.country = Some(code);
        self.region = None;
        self.selected_landmark = None;
    }

    pub fn set_region(&mut self, code: Option<String>) {
        self.region = code;
        self.selected_landmark = None;
    }

    pub fn set_start_date(&mut self, start: Option<NaiveDate>) {
        self.dates.start = start;
    }

    pub fn set_end_date(&mut self, end: Option<NaiveDate>) {
        self.dates.end = end;
    }

    pub fn set_theme(&mut self, theme: Option<Theme>) {
        self.theme_override = theme;
    }

    /// The explicit choice if any, otherwise the country default.
    pub fn effective_theme(&self) -> Option<Theme> {
        self.theme_override.or_else(|| self.country.map(catalog::default_theme))
    }

    pub fn add_to_checklist(&mut self, region_code: &str, region_label: &str, landmark: &Landmark) -> bool {
        self.checklist.add(region_code, region_label, landmark)
    }

    pub fn remove_from_checklist(&mut self, key: &str) -> bool {
        self.checklist.remove(key)
    }

    /// Both dates chosen and at least one landmark checked.
    pub fn can_generate(&self) -> bool {
        self.dates.is_complete() && !self.checklist.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn landmark(id: i64) -> Landmark {
        Landmark {
            id,
            name: format!("Landmark {}", id),
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

    #[test]
    fn calc_days_is_inclusive_and_clamped() {
        assert_eq!(calc_days(d("2024-05-01"), d("2024-05-01")), 1);
        assert_eq!(calc_days(d("2024-05-01"), d("2024-05-03")), 3);
        assert_eq!(calc_days(d("2024-05-03"), d("2024-05-01")), 1);
    }

    #[test]
    fn calc_days_crosses_month_boundaries() {
        assert_eq!(calc_days(d("2024-02-28"), d("2024-03-01")), 3);
    }

    #[test]
    fn parse_date_rejects_other_formats() {
        assert!(parse_date("05/01/2024").is_err());
        assert_eq!(parse_date(" 2024-05-01 ").unwrap(), d("2024-05-01"));
    }

    #[test]
    fn can_generate_needs_dates_and_checklist() {
        let mut sel = Selection::default();
        assert!(!sel.can_generate());

        sel.set_start_date(Some(d("2024-05-01")));
        sel.set_end_date(Some(d("2024-05-03")));
        assert!(!sel.can_generate());

        let mut no_dates = Selection::default();
        no_dates.add_to_checklist("tokyo", "Tokyo", &landmark(1));
        assert!(!no_dates.can_generate());

        sel.add_to_checklist("tokyo", "Tokyo", &landmark(1));
        assert!(sel.can_generate());

        sel.set_end_date(None);
        assert!(!sel.can_generate());
    }

    #[test]
    fn country_switch_keeps_checklist_but_drops_region() {
        let mut sel = Selection::default();
        sel.set_country(CountryCode::Japan);
        sel.set_region(Some("tokyo".into()));
        sel.selected_landmark = Some(1);
        sel.add_to_checklist("tokyo", "Tokyo", &landmark(1));

        sel.set_country(CountryCode::Thailand);
        assert_eq!(sel.region, None);
        assert_eq!(sel.selected_landmark, None);
        assert_eq!(sel.checklist.len(), 1);
    }

    #[test]
    fn theme_defaults_per_country_unless_overridden() {
        let mut sel = Selection::default();
        assert_eq!(sel.effective_theme(), None);
        sel.set_country(CountryCode::Thailand);
        assert_eq!(sel.effective_theme(), Some(Theme::Activity));
        sel.set_theme(Some(Theme::Nature));
        assert_eq!(sel.effective_theme(), Some(Theme::Nature));
    }
}
