use serde::{Deserialize, Serialize};

use crate::domain::entities::geo::LatLng;

/// A confirmed correction for one store. Field names match the persisted layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EditEntry {
    pub store_name: String,
    pub province: String,
    pub old_latitude: f64,
    pub old_longitude: f64,
    pub latitude: f64,
    pub longitude: f64,
}

impl EditEntry {
    pub fn new(store_name: String, province: String, old: LatLng, new: LatLng) -> Self {
        Self {
            store_name,
            province,
            old_latitude: old.lat,
            old_longitude: old.lng,
            latitude: new.lat,
            longitude: new.lng,
        }
    }

    pub fn old_position(&self) -> LatLng {
        LatLng::new(self.old_latitude, self.old_longitude)
    }

    pub fn new_position(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} (Province: {}): Old: ({}) -> New: ({})",
            self.store_name,
            self.province,
            self.old_position().display(),
            self.new_position().display()
        )
    }
}
