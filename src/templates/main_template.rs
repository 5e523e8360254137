use askama::Template;

use crate::models::PlannerView;

#[derive(Template)]
#[template(path = "main.html")]
pub struct MainTemplate {
    pub flash_messages: Vec<String>,
    pub view: PlannerView,
}
