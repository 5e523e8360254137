use serde::{Deserialize, Serialize};

/// A point of interest inside one region. Extended fields are optional
/// because not every landmark has been enriched on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub lat: f64,
    pub lng: f64,
    pub long_description: Option<String>,
    pub highlights: Vec<String>,
    pub best_time: Option<String>,
    pub recommended_duration: Option<String>,
    pub local_tip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub rating: Option<f64>,
    pub signature_menu: Option<String>,
    pub opening_hours: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Museum {
    pub id: i64,
    pub name: String,
    pub opening_info: Option<String>,
    pub description: Option<String>,
}

/// Flattened supplementary entry, whatever list it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub name: String,
    pub detail: String,
}

/// A region's landmarks plus the country-specific supplementary list
/// (restaurants for Japan, activities for Thailand, museums for the UK).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub landmarks: Vec<Landmark>,
    pub restaurants: Vec<Restaurant>,
    pub activities: Vec<Activity>,
    pub museums: Vec<Museum>,
}

impl Overview {
    pub fn landmark(&self, id: i64) -> Option<&Landmark> {
        self.landmarks.iter().find(|l| l.id == id)
    }

    pub fn recommendations(&self) -> Vec<Recommendation> {
        let mut out = Vec::new();
        for r in &self.restaurants {
            let mut parts = Vec::new();
            if let Some(rating) = r.rating {
                parts.push(format!("★ {:.1}", rating));
            }
            if let Some(menu) = &r.signature_menu {
                parts.push(menu.clone());
            }
            if let Some(hours) = &r.opening_hours {
                parts.push(hours.clone());
            }
            out.push(Recommendation { name: r.name.clone(), detail: parts.join(" · ") });
        }
        for a in &self.activities {
            out.push(Recommendation {
                name: a.name.clone(),
                detail: a.description.clone().unwrap_or_default(),
            });
        }
        for m in &self.museums {
            let detail = match (&m.opening_info, &m.description) {
                (Some(o), Some(d)) => format!("{} · {}", o, d),
                (Some(o), None) => o.clone(),
                (None, Some(d)) => d.clone(),
                (None, None) => String::new(),
            };
            out.push(Recommendation { name: m.name.clone(), detail });
        }
        out
    }
}
