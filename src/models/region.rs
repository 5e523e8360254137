use serde::{Deserialize, Serialize};

use super::CountryCode;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub country_code: CountryCode,
}
