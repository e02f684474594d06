use crate::domain::error::RouteError;
use serde::{Deserialize, Serialize};

/// A coordinate in canonical (longitude, latitude) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub fn new(longitude: f64, latitude: f64) -> Result<Self, RouteError> {
        let point = Self {
            longitude,
            latitude,
        };
        if !point.is_valid() {
            return Err(RouteError::InvalidCoordinate {
                longitude,
                latitude,
            });
        }
        Ok(point)
    }

    pub fn is_valid(&self) -> bool {
        self.longitude.is_finite()
            && self.latitude.is_finite()
            && (-180.0..=180.0).contains(&self.longitude)
            && (-90.0..=90.0).contains(&self.latitude)
    }

    pub fn to_lon_lat(self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// Ordered, non-empty sequence of points in traversal order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    points: Vec<GeoPoint>,
}

impl Path {
    pub fn new(points: Vec<GeoPoint>) -> Result<Self, RouteError> {
        if points.is_empty() {
            return Err(RouteError::EmptyPath);
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Never zero: `new` rejects an empty point list.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> GeoPoint {
        self.points[0]
    }

    pub fn last(&self) -> GeoPoint {
        self.points[self.points.len() - 1]
    }

    pub fn to_lon_lat(&self) -> Vec<[f64; 2]> {
        self.points.iter().map(|point| point.to_lon_lat()).collect()
    }
}

/// Target route and its synthesized camera path, index for index.
#[derive(Debug, Clone)]
pub struct RouteGeometry {
    target: Path,
    camera: Path,
}

impl RouteGeometry {
    pub fn new(target: Path, camera: Path) -> Result<Self, RouteError> {
        if target.len() < 2 {
            return Err(RouteError::DegenerateRoute {
                points: target.len(),
            });
        }
        if camera.len() != target.len() {
            return Err(RouteError::CardinalityMismatch {
                target: target.len(),
                camera: camera.len(),
            });
        }
        Ok(Self { target, camera })
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn camera(&self) -> &Path {
        &self.camera
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPosition {
    pub point: GeoPoint,
    pub altitude_m: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraPose {
    pub position: CameraPosition,
    pub look_at: GeoPoint,
    pub pitch_degrees: f64,
    pub bearing_degrees: f64,
}

#[cfg(test)]
mod tests {
    use super::{GeoPoint, Path, RouteGeometry};
    use crate::domain::error::RouteError;

    #[test]
    fn geo_point_rejects_out_of_range_values() {
        assert!(GeoPoint::new(181.0, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -90.5).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-180.0, 90.0).is_ok());
    }

    #[test]
    fn empty_path_is_rejected() {
        assert!(matches!(Path::new(Vec::new()), Err(RouteError::EmptyPath)));
        let single = Path::new(vec![GeoPoint::new(73.0479, 33.6844).unwrap()]).unwrap();
        assert_eq!(single.len(), 1);
        assert_eq!(single.first(), single.last());
    }

    #[test]
    fn single_point_route_is_degenerate() {
        let point = GeoPoint::new(73.0479, 33.6844).unwrap();
        let path = Path::new(vec![point]).unwrap();
        let result = RouteGeometry::new(path.clone(), path);
        assert!(matches!(
            result,
            Err(RouteError::DegenerateRoute { points: 1 })
        ));
    }

    #[test]
    fn lon_lat_output_keeps_order() {
        let path = Path::new(vec![
            GeoPoint::new(1.0, 2.0).unwrap(),
            GeoPoint::new(3.0, 4.0).unwrap(),
        ])
        .unwrap();
        assert_eq!(path.to_lon_lat(), vec![[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(path.first().longitude, 1.0);
        assert_eq!(path.last().latitude, 4.0);
    }
}
