//! Great-circle helpers on a spherical Earth.
//!
//! Every function here shares [`EARTH_RADIUS_KM`] so distances, bearings and
//! projections stay consistent between the target and camera paths.

use crate::domain::geo::{GeoPoint, Path};

/// Mean Earth radius (IUGG), kilometres.
pub const EARTH_RADIUS_KM: f64 = 6_371.0088;

pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat * 0.5).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon * 0.5).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().atan2((1.0 - h).sqrt())
}

pub fn length(path: &Path) -> f64 {
    path.points()
        .windows(2)
        .map(|pair| distance_km(pair[0], pair[1]))
        .sum()
}

/// Initial great-circle bearing from `a` to `b`, in `[0, 360)` degrees.
/// Identical points yield 0.
pub fn bearing_between(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lon = (b.longitude - a.longitude).to_radians();

    let y = d_lon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
    normalize_degrees(y.atan2(x).to_degrees())
}

pub fn destination_point(origin: GeoPoint, distance: f64, bearing_degrees: f64) -> GeoPoint {
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let bearing = bearing_degrees.to_radians();
    let delta = distance / EARTH_RADIUS_KM;

    let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * bearing.cos()).asin();
    let lon2 = lon1
        + (bearing.sin() * delta.sin() * lat1.cos()).atan2(delta.cos() - lat1.sin() * lat2.sin());

    GeoPoint {
        longitude: wrap_longitude(lon2.to_degrees()),
        latitude: lat2.to_degrees(),
    }
}

/// Point reached after travelling `distance` km along `path`, clamped to the
/// path's extent.
pub fn point_at_distance(path: &Path, distance: f64) -> GeoPoint {
    let points = path.points();
    if !distance.is_finite() || distance <= 0.0 {
        return path.first();
    }
    if distance >= length(path) {
        return path.last();
    }

    let mut travelled = 0.0;
    for pair in points.windows(2) {
        let segment = distance_km(pair[0], pair[1]);
        if segment <= 0.0 {
            continue;
        }
        if travelled + segment >= distance {
            let remaining = distance - travelled;
            if remaining <= 0.0 {
                return pair[0];
            }
            return destination_point(pair[0], remaining, bearing_between(pair[0], pair[1]));
        }
        travelled += segment;
    }
    path.last()
}

pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

fn wrap_longitude(degrees: f64) -> f64 {
    if (-180.0..=180.0).contains(&degrees) {
        return degrees;
    }
    (degrees + 540.0).rem_euclid(360.0) - 180.0
}
