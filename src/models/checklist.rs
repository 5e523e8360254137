use serde::{Deserialize, Serialize};

use super::Landmark;

/// One landmark the user wants in the itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// `"{region_code}-{landmark_id}"`, unique within a checklist.
    pub key: String,
    pub id: i64,
    pub name: String,
    pub region_code: String,
    pub region_label: String,
}

pub fn checklist_key(region_code: &str, landmark_id: i64) -> String {
    format!("{}-{}", region_code, landmark_id)
}

/// Insertion-ordered set of landmarks keyed by region + id.
///
/// The checklist is deliberately not scoped to the current region: items
/// picked in one region stay when the user moves to another, so a single
/// trip can span several regions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    items: Vec<ChecklistItem>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and changes nothing) when the key is already present.
    pub fn add(&mut self, region_code: &str, region_label: &str, landmark: &Landmark) -> bool {
        let key = checklist_key(region_code, landmark.id);
        if self.contains(&key) {
            return false;
        }
        self.items.push(ChecklistItem {
            key,
            id: landmark.id,
            name: landmark.name.clone(),
            region_code: region_code.to_string(),
            region_label: region_label.to_string(),
        });
        true
    }

    /// Returns whether an entry was removed. Absent keys are not an error.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|i| i.key != key);
        self.items.len() != before
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|i| i.key == key)
    }

    /// Landmark ids in checklist order. Ids are not disambiguated by region.
    pub fn landmark_ids(&self) -> Vec<i64> {
        self.items.iter().map(|i| i.id).collect()
    }

    pub fn items(&self) -> &[ChecklistItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
