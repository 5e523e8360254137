use crate::error::PlanError;
use crate::models::ItineraryRequest;

use super::selection::{calc_days, Selection};

/// Assemble the generation request from the current selection.
///
/// Does not check that the checklist is non-empty; callers gate on
/// [`Selection::can_generate`] first.
pub fn build_request(selection: &Selection) -> Result<ItineraryRequest, PlanError> {
    let country = selection.country.ok_or(PlanError::NoRegionSelected)?;
    let region_code = selection.region.clone().ok_or(PlanError::NoRegionSelected)?;
    let (start, end) = match (selection.dates.start, selection.dates.end) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err(PlanError::NotReady),
    };
    let theme = selection.effective_theme().unwrap_or_else(|| crate::catalog::default_theme(country));
    Ok(ItineraryRequest {
        country_code: country,
        region_code,
        days: calc_days(start, end),
        start_date: start,
        theme,
        selected_landmark_ids: selection.checklist.landmark_ids(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CountryCode, Landmark, Theme};
    use crate::planner::parse_date;

    fn landmark(id: i64) -> Landmark {
        Landmark {
            id,
            name: format!("#{}", id),
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

    fn ready_selection() -> Selection {
        let mut sel = Selection::default();
        sel.set_country(CountryCode::Japan);
        sel.set_region(Some("osaka".into()));
        sel.set_start_date(Some(parse_date("2024-05-01").unwrap()));
        sel.set_end_date(Some(parse_date("2024-05-04").unwrap()));
        sel
    }

    #[test]
    fn builds_request_from_selection() {
        let mut sel = ready_selection();
        sel.add_to_checklist("osaka", "Osaka", &landmark(12));
        sel.add_to_checklist("tokyo", "Tokyo", &landmark(4));

        let req = build_request(&sel).unwrap();
        assert_eq!(req.country_code, CountryCode::Japan);
        assert_eq!(req.region_code, "osaka");
        assert_eq!(req.days, 4);
        assert_eq!(req.theme, Theme::Food);
        assert_eq!(req.selected_landmark_ids, vec![12, 4]);
    }

    #[test]
    fn request_serializes_to_backend_shape() {
        let mut sel = ready_selection();
        sel.set_theme(Some(Theme::Shopping));
        sel.add_to_checklist("osaka", "Osaka", &landmark(12));
        let json = serde_json::to_value(build_request(&sel).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "country_code": "JP",
                "region_code": "osaka",
                "days": 4,
                "start_date": "2024-05-01",
                "theme": "shopping",
                "selected_landmark_ids": [12]
            })
        );
    }

    #[test]
    fn missing_dates_or_region_are_reported() {
        let mut sel = ready_selection();
        sel.set_start_date(None);
        assert_eq!(build_request(&sel), Err(PlanError::NotReady));

        let mut sel = ready_selection();
        sel.set_region(None);
        assert_eq!(build_request(&sel), Err(PlanError::NoRegionSelected));
    }
}
