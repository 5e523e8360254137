pub mod home_template;
pub mod main_template;
pub mod report_empty_template;
pub mod report_template;

pub use home_template::HomeTemplate;
pub use main_template::MainTemplate;
pub use report_empty_template::ReportEmptyTemplate;
pub use report_template::ReportTemplate;
