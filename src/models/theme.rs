use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category tag steering what the generated itinerary emphasises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Food,
    Activity,
    Museum,
    Shopping,
    Nature,
}

impl Theme {
    pub const ALL: [Theme; 5] = [Theme::Food, Theme::Activity, Theme::Museum, Theme::Shopping, Theme::Nature];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Food => "food",
            Theme::Activity => "activity",
            Theme::Museum => "museum",
            Theme::Shopping => "shopping",
            Theme::Nature => "nature",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| format!("unknown theme: {}", s.trim()))
    }
}
