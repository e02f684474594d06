use crate::core::geometry::spherical::{bearing_between, destination_point, distance_km};
use crate::domain::geo::Path;

pub const DEFAULT_CAMERA_OFFSET_KM: f64 = 0.01;

/// Builds the chase-camera path: each vertex after the first is projected
/// `offset_km` from its predecessor along the predecessor's heading.
pub fn synthesize(target: &Path, offset_km: f64) -> Path {
    let points = target.points();
    let mut output = Vec::with_capacity(points.len());
    output.push(points[0]);

    let mut heading: Option<f64> = None;
    for pair in points.windows(2) {
        let (previous, current) = (pair[0], pair[1]);
        if distance_km(previous, current) > 0.0 {
            heading = Some(bearing_between(previous, current));
        }
        // Zero-length segments keep the last known heading.
        let bearing = heading.unwrap_or(0.0);
        output.push(destination_point(previous, offset_km, bearing));
    }

    // Cardinality matches the non-empty target, so this cannot fail.
    Path::new(output).unwrap_or_else(|_| target.clone())
}

#[cfg(test)]
mod tests {
    use super::{synthesize, DEFAULT_CAMERA_OFFSET_KM};
    use crate::core::geometry::spherical::{bearing_between, distance_km};
    use crate::domain::geo::{GeoPoint, Path};

    fn point(longitude: f64, latitude: f64) -> GeoPoint {
        GeoPoint::new(longitude, latitude).unwrap()
    }

    fn islamabad() -> Path {
        Path::new(vec![
            point(73.0479, 33.6844),
            point(73.05, 33.70),
            point(73.06, 33.72),
        ])
        .unwrap()
    }

    #[test]
    fn camera_path_keeps_cardinality_and_first_vertex() {
        let target = islamabad();
        let camera = synthesize(&target, DEFAULT_CAMERA_OFFSET_KM);
        assert_eq!(camera.len(), target.len());
        assert_eq!(camera.first(), target.first());
    }

    #[test]
    fn each_vertex_is_offset_from_its_predecessor() {
        let target = islamabad();
        let camera = synthesize(&target, DEFAULT_CAMERA_OFFSET_KM);
        for index in 1..target.len() {
            let previous = target.points()[index - 1];
            let offset = distance_km(previous, camera.points()[index]);
            assert!((offset - DEFAULT_CAMERA_OFFSET_KM).abs() < 1e-9);
            let heading = bearing_between(previous, target.points()[index]);
            let camera_heading = bearing_between(previous, camera.points()[index]);
            assert!((heading - camera_heading).abs() < 1e-6);
        }
    }

    #[test]
    fn repeated_vertex_reuses_previous_heading() {
        let target = Path::new(vec![
            point(0.0, 0.0),
            point(1.0, 0.0),
            point(1.0, 0.0),
        ])
        .unwrap();
        let camera = synthesize(&target, 1.0);
        let heading = bearing_between(target.points()[1], camera.points()[2]);
        assert!((heading - 90.0).abs() < 1e-6);
    }

    #[test]
    fn leading_repeated_vertex_falls_back_to_north() {
        let here = point(10.0, 10.0);
        let target = Path::new(vec![here, here, point(11.0, 10.0)]).unwrap();
        let camera = synthesize(&target, 1.0);
        assert!(camera.points()[1].latitude > here.latitude);
        assert!((camera.points()[1].longitude - here.longitude).abs() < 1e-9);
    }
}
