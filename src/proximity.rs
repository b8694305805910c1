use geo_types::Point;
use itertools::Itertools;
use serde::Serialize;

use crate::stops::StopStore;

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, thiserror::Error)]
pub enum InvalidQueryError {
    #[error("coordinate is not a finite number")]
    NonFinite,

    #[error("latitude {0} outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

/// A validated query position. Construction is the only validation gate:
/// holding a `QueryPoint` means both coordinates are finite and in range.
#[derive(Debug, Clone, Copy)]
pub struct QueryPoint(Point<f64>);

impl QueryPoint {
    pub fn new(lat: f64, lon: f64) -> Result<Self, InvalidQueryError> {
        if !lat.is_finite() || !lon.is_finite() {
            return Err(InvalidQueryError::NonFinite);
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(InvalidQueryError::LatitudeOutOfRange(lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(InvalidQueryError::LongitudeOutOfRange(lon));
        }
        Ok(Self(Point::new(lon, lat)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NearbyStop {
    pub name: String,
    pub distance: f64,
}

/// Great-circle distance in meters between two points, spherical law of
/// cosines. The clamp keeps rounding error from pushing the acos argument
/// out of [-1, 1] for near-identical or antipodal points.
pub fn great_circle_distance(a: Point<f64>, b: Point<f64>) -> f64 {
    let lat1 = a.y().to_radians();
    let lat2 = b.y().to_radians();
    let delta_lon = (b.x() - a.x()).to_radians();

    let cos_angle = lat1.cos() * lat2.cos() * delta_lon.cos() + lat1.sin() * lat2.sin();
    EARTH_RADIUS_M * cos_angle.clamp(-1.0, 1.0).acos()
}

/// The `k` stops closest to `(lat, lon)`, ascending by distance. Ties keep
/// the store's insertion order. Validation happens before any distance is
/// computed; an invalid point never touches the store.
pub fn nearest(
    store: &StopStore,
    lat: f64,
    lon: f64,
    k: usize,
) -> Result<Vec<NearbyStop>, InvalidQueryError> {
    let QueryPoint(query) = QueryPoint::new(lat, lon)?;

    Ok(store
        .list()
        .iter()
        .map(|stop| NearbyStop {
            name: stop.name.clone(),
            distance: great_circle_distance(query, stop.point()),
        })
        .sorted_by(|a, b| a.distance.total_cmp(&b.distance))
        .take(k)
        .collect())
}
