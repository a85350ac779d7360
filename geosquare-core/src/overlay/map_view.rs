use serde::{Deserialize, Serialize};

use crate::model::Coordinate;

/// initial center and zoom used when the map is created.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center_latitude: 0.0,
            center_longitude: 0.0,
            zoom: 14,
        }
    }
}

impl MapView {
    pub fn center(&self) -> Coordinate {
        Coordinate {
            latitude: self.center_latitude,
            longitude: self.center_longitude,
        }
    }
}
