use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of destinations the backend plans trips for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CountryCode {
    #[serde(rename = "JP")]
    Japan,
    #[serde(rename = "UK")]
    UnitedKingdom,
    #[serde(rename = "TH")]
    Thailand,
}

impl CountryCode {
    pub const ALL: [CountryCode; 3] = [CountryCode::Japan, CountryCode::UnitedKingdom, CountryCode::Thailand];

    pub fn as_str(&self) -> &'static str {
        match self {
            CountryCode::Japan => "JP",
            CountryCode::UnitedKingdom => "UK",
            CountryCode::Thailand => "TH",
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountryCode {
    type Err = String;

    /// Accepts `jp`, `uk`, `th` and `gb` in any case, plus the long slugs
    /// `japan` and `thailand` older links still carry.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "jp" | "japan" => Ok(CountryCode::Japan),
            "uk" | "gb" => Ok(CountryCode::UnitedKingdom),
            "th" | "thailand" => Ok(CountryCode::Thailand),
            other => Err(format!("unsupported country code: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: CountryCode,
    pub label: String,
}
