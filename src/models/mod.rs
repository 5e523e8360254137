pub mod app_state;
pub mod checklist;
pub mod country;
pub mod itinerary;
pub mod landmark;
pub mod planner_view;
pub mod region;
pub mod report_view;
pub mod theme;
pub mod weather;

pub use app_state::AppState;
pub use checklist::{checklist_key, Checklist, ChecklistItem};
pub use country::{Country, CountryCode};
pub use itinerary::{
    DayPlan, GeneratedItinerary, ItineraryReport, ItineraryRequest, PlannedStop, ReportOverview, Tips,
};
pub use landmark::{Activity, Landmark, Museum, Overview, Recommendation, Restaurant};
pub use planner_view::{
    ChecklistRow, CountryCard, LandmarkCard, LandmarkDetail, PlannerView, RegionOption, ThemeOption, WeatherRow,
};
pub use region::Region;
pub use report_view::{DayRow, PlacementRow, ReportView, StopRow};
pub use theme::Theme;
pub use weather::{DailyWeather, Forecast};
