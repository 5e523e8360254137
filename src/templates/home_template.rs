use askama::Template;

use crate::models::CountryCard;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub flash_messages: Vec<String>,
    pub countries: Vec<CountryCard>,
    /// Shown when the backend was unreachable and the built-in list is used.
    pub notice: Option<String>,
}
