pub mod helpers;
pub mod home;
pub mod planner;
pub mod report;

pub use home::home_get;
pub use planner::{
    checklist_add_post, checklist_remove_post, dates_post, generate_post, landmark_close_post, landmark_post,
    main_get, region_post, theme_post, weather_post,
};
pub use report::{report_csv_get, report_get};
