use geo::{Centroid, Intersects};
use serde::{Deserialize, Serialize};

use super::{Coordinate, ModelError};

/// the latitude/longitude rectangle covered by a cell label. the remote
/// service owns the cell geometry, so only internal consistency is checked
/// here (finite values, start not past end).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct BoundingArea {
    pub lat_start: f64,
    pub lon_start: f64,
    pub lat_end: f64,
    pub lon_end: f64,
}

impl BoundingArea {
    pub fn new(
        lat_start: f64,
        lon_start: f64,
        lat_end: f64,
        lon_end: f64,
    ) -> Result<Self, ModelError> {
        let area = Self {
            lat_start,
            lon_start,
            lat_end,
            lon_end,
        };
        area.validate()?;
        Ok(area)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        for (axis, value) in [
            ("lat_start", self.lat_start),
            ("lon_start", self.lon_start),
            ("lat_end", self.lat_end),
            ("lon_end", self.lon_end),
        ] {
            if !value.is_finite() {
                return Err(ModelError::NonFiniteBound { axis, value });
            }
        }
        if self.lat_start > self.lat_end {
            return Err(ModelError::InvertedBounds {
                axis: "latitude",
                start: self.lat_start,
                end: self.lat_end,
            });
        }
        if self.lon_start > self.lon_end {
            return Err(ModelError::InvertedBounds {
                axis: "longitude",
                start: self.lon_start,
                end: self.lon_end,
            });
        }
        Ok(())
    }

    /// the area as a geo rectangle with x as longitude and y as latitude.
    pub fn to_rect(&self) -> geo_types::Rect<f64> {
        geo_types::Rect::new(
            geo_types::coord! { x: self.lon_start, y: self.lat_start },
            geo_types::coord! { x: self.lon_end, y: self.lat_end },
        )
    }

    /// midpoint of the area, where the cell label is placed.
    pub fn center(&self) -> Coordinate {
        Coordinate::from(self.to_rect().centroid())
    }

    /// true if the coordinate lies inside the area or on its boundary.
    pub fn covers(&self, coordinate: &Coordinate) -> bool {
        let coord = geo_types::coord! { x: coordinate.longitude, y: coordinate.latitude };
        self.to_rect().intersects(&coord)
    }
}
