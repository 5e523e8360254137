use crate::catalog;
use crate::models::{Recommendation, Theme};
use crate::planner::PlanningSession;

#[derive(Clone)]
pub struct CountryCard {
    pub code: String,
    pub label: String,
    pub native_label: String,
}

#[derive(Clone)]
pub struct RegionOption {
    pub code: String,
    pub name: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct ThemeOption {
    pub value: String,
    pub selected: bool,
}

#[derive(Clone)]
pub struct LandmarkCard {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub checked: bool,
    pub open: bool,
}

#[derive(Clone)]
pub struct LandmarkDetail {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub long_description: String,
    pub highlights: Vec<String>,
    pub best_time: String,
    pub recommended_duration: String,
    pub local_tip: String,
    pub coordinates: String,
    pub checked: bool,
}

#[derive(Clone)]
pub struct WeatherRow {
    pub date: String,
    pub glyph: String,
    pub status: String,
    pub temperatures: String,
}

#[derive(Clone)]
pub struct ChecklistRow {
    pub key: String,
    pub name: String,
    pub region_label: String,
}

/// Everything the planning page shows, flattened out of the session.
pub struct PlannerView {
    pub country_code: String,
    pub country_label: String,
    pub regions: Vec<RegionOption>,
    pub regions_error: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub days_label: String,
    pub themes: Vec<ThemeOption>,
    pub landmarks: Vec<LandmarkCard>,
    pub overview_error: Option<String>,
    pub detail: Option<LandmarkDetail>,
    pub recommendations_label: String,
    pub recommendations: Vec<Recommendation>,
    pub forecast: Vec<WeatherRow>,
    pub weather_error: Option<String>,
    pub weather_enabled: bool,
    pub checklist: Vec<ChecklistRow>,
    pub can_generate: bool,
    pub generating: bool,
    pub generation_error: Option<String>,
}

impl PlannerView {
    pub fn from_session(s: &PlanningSession) -> Self {
        let sel = s.selection();
        let region_code = sel.region.clone().unwrap_or_default();
        let (country_code, country_label, recommendations_label) = match sel.country {
            Some(c) => (
                c.as_str().to_string(),
                catalog::country_label(c).to_string(),
                catalog::country_meta(c).recommendations_label.to_string(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        let is_checked = |id: i64| sel.checklist.contains(&crate::models::checklist_key(&region_code, id));
        let effective_theme = sel.effective_theme();

        let landmarks = s
            .overview()
            .map(|o| {
                o.landmarks
                    .iter()
                    .map(|l| LandmarkCard {
                        id: l.id,
                        name: l.name.clone(),
                        description: l.description.clone(),
                        checked: is_checked(l.id),
                        open: sel.selected_landmark == Some(l.id),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let detail = s.selected_landmark().map(|l| LandmarkDetail {
            id: l.id,
            name: l.name.clone(),
            description: l.description.clone(),
            long_description: l.long_description.clone().unwrap_or_default(),
            highlights: l.highlights.clone(),
            best_time: l.best_time.clone().unwrap_or_default(),
            recommended_duration: l.recommended_duration.clone().unwrap_or_default(),
            local_tip: l.local_tip.clone().unwrap_or_default(),
            coordinates: format!("{:.5}, {:.5}", l.lat, l.lng),
            checked: is_checked(l.id),
        });

        let forecast = s
            .forecast()
            .map(|f| {
                f.daily
                    .iter()
                    .map(|d| WeatherRow {
                        date: d.date.format("%Y-%m-%d").to_string(),
                        glyph: catalog::weather_glyph(&d.icon_type).to_string(),
                        status: d.status.clone(),
                        temperatures: format!("{:.0}° / {:.0}°", d.temperature_max, d.temperature_min),
                    })
                    .collect()
            })
            .unwrap_or_default();

        PlannerView {
            country_code,
            country_label,
            regions: s
                .regions()
                .iter()
                .map(|r| RegionOption {
                    code: r.code.clone(),
                    name: r.name.clone(),
                    selected: r.code == region_code,
                })
                .collect(),
            regions_error: s.regions_error().map(str::to_string),
            start_date: sel.dates.start.map(|d| d.to_string()).unwrap_or_default(),
            end_date: sel.dates.end.map(|d| d.to_string()).unwrap_or_default(),
            days_label: match sel.dates.days() {
                Some(1) => "1 day".to_string(),
                Some(n) => format!("{} days", n),
                None => String::new(),
            },
            themes: Theme::ALL
                .iter()
                .map(|t| ThemeOption {
                    value: t.as_str().to_string(),
                    selected: Some(*t) == effective_theme,
                })
                .collect(),
            landmarks,
            overview_error: s.overview_error().map(str::to_string),
            detail,
            recommendations_label,
            recommendations: s.overview().map(|o| o.recommendations()).unwrap_or_default(),
            forecast,
            weather_error: s.weather_error().map(str::to_string),
            weather_enabled: s.current_region().is_some() && sel.dates.is_complete(),
            checklist: sel
                .checklist
                .items()
                .iter()
                .map(|i| ChecklistRow {
                    key: i.key.clone(),
                    name: i.name.clone(),
                    region_label: i.region_label.clone(),
                })
                .collect(),
            can_generate: s.can_generate() && !s.is_generating(),
            generating: s.is_generating(),
            generation_error: s.generation_error().map(str::to_string),
        }
    }
}
