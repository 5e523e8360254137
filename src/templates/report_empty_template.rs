use askama::Template;

/// Report page reached without a completed generation.
#[derive(Template)]
#[template(path = "report_empty.html")]
pub struct ReportEmptyTemplate {
    pub flash_messages: Vec<String>,
}
