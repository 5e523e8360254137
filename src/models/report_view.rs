use crate::catalog;
use crate::models::Recommendation;
use crate::report::ReportPage;

pub struct StopRow {
    pub name: String,
    pub reason: String,
    pub picked: bool,
}

pub struct DayRow {
    pub day: u32,
    pub title: String,
    pub reason: String,
    pub stops: Vec<StopRow>,
}

pub struct PlacementRow {
    pub name: String,
    pub region_label: String,
    pub schedule: String,
}

pub struct ReportView {
    pub country_label: String,
    pub region_label: String,
    pub start_date: String,
    pub end_date: String,
    pub theme: String,
    pub placements: Vec<PlacementRow>,
    pub has_report: bool,
    pub report_error: Option<String>,
    pub title: String,
    pub summary: String,
    pub highlights: Vec<String>,
    pub days: Vec<DayRow>,
    pub packing: Vec<String>,
    pub local_tips: Vec<String>,
    pub travel_error: Option<String>,
    pub recommendations_label: String,
    pub recommendations: Vec<Recommendation>,
    pub csv_filename: Option<String>,
}

impl From<&ReportPage> for ReportView {
    fn from(page: &ReportPage) -> Self {
        let h = &page.handoff;
        let report = page.report.ready();
        ReportView {
            country_label: h.country_label.clone(),
            region_label: h.region_label.clone(),
            start_date: h.start_date.to_string(),
            end_date: h.end_date.to_string(),
            theme: h.theme.to_string(),
            placements: page
                .placements
                .iter()
                .map(|p| PlacementRow {
                    name: p.item.name.clone(),
                    region_label: p.item.region_label.clone(),
                    schedule: match &p.scheduled {
                        Some(v) => format!("Day {} · {}", v.day, v.day_title),
                        None => "Not scheduled".to_string(),
                    },
                })
                .collect(),
            has_report: report.is_some(),
            report_error: page.report.error().map(str::to_string),
            title: report.map(|r| r.overview.title.clone()).unwrap_or_default(),
            summary: report.map(|r| r.overview.summary.clone()).unwrap_or_default(),
            highlights: report.map(|r| r.overview.highlights.clone()).unwrap_or_default(),
            days: report
                .map(|r| {
                    r.daily_plan
                        .iter()
                        .map(|d| DayRow {
                            day: d.day,
                            title: d.title.clone(),
                            reason: d.reason.clone(),
                            stops: d
                                .landmarks
                                .iter()
                                .map(|s| StopRow {
                                    name: s.name.clone(),
                                    reason: s.reason.clone(),
                                    picked: s.is_user_selected,
                                })
                                .collect(),
                        })
                        .collect()
                })
                .unwrap_or_default(),
            packing: report.map(|r| r.tips.packing.clone()).unwrap_or_default(),
            local_tips: report.map(|r| r.tips.local.clone()).unwrap_or_default(),
            travel_error: page.travel.error().map(str::to_string),
            recommendations_label: catalog::country_meta(h.country_code).recommendations_label.to_string(),
            recommendations: page.travel.ready().map(|o| o.recommendations()).unwrap_or_default(),
            csv_filename: page.csv_filename.clone(),
        }
    }
}
