use askama::Template;

use crate::models::ReportView;

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportTemplate {
    pub flash_messages: Vec<String>,
    pub view: ReportView,
}
