use serde::{Deserialize, Serialize};

use super::ModelError;

/// a WGS84 position as supplied by a user or a device.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// builds a coordinate, rejecting values outside of the valid latitude and
    /// longitude ranges. out-of-range values are never clamped.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ModelError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ModelError::InvalidLatitude(self.latitude));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ModelError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }
}

impl From<&Coordinate> for geo_types::Point<f64> {
    fn from(value: &Coordinate) -> Self {
        geo_types::Point::new(value.longitude, value.latitude)
    }
}

impl From<geo_types::Point<f64>> for Coordinate {
    fn from(value: geo_types::Point<f64>) -> Self {
        Coordinate {
            latitude: value.y(),
            longitude: value.x(),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.latitude, self.longitude)
    }
}
