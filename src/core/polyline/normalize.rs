use crate::core::polyline::codec::LatLng;
use crate::domain::error::RouteError;
use crate::domain::geo::{GeoPoint, Path};

/// Reorders decoded (lat, lon) pairs into (lon, lat) points.
pub fn normalize(pairs: &[LatLng]) -> Result<Path, RouteError> {
    let points = pairs
        .iter()
        .map(|pair| GeoPoint::new(pair.longitude, pair.latitude))
        .collect::<Result<Vec<_>, _>>()?;
    Path::new(points)
}
