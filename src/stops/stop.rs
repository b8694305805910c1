use geo_types::Point;
use serde::{Deserialize, Serialize};

/// A named transit stop with a stable identifier and a WGS84 position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl Stop {
    pub fn new(id: i64, name: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            id,
            name: name.into(),
            lat,
            lon,
        }
    }

    /// Position as a point, x = lon and y = lat.
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lon, self.lat)
    }

    pub fn has_valid_coords(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}
