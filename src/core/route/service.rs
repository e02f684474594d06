use crate::core::camera::synthesizer::synthesize;
use crate::core::polyline::codec::decode_with_precision;
use crate::core::polyline::normalize::normalize;
use crate::domain::error::RouteError;
use crate::domain::geo::RouteGeometry;
use crate::domain::models::{EtaDisplay, PlaybackConfig, RouteEvent};
use uuid::Uuid;

/// A fully prepared route, ready to hand to the playback session.
#[derive(Debug, Clone)]
pub struct RouteBinding {
    pub route_id: Uuid,
    pub geometry: RouteGeometry,
    pub eta: EtaDisplay,
}

pub fn prepare_route(
    event: &RouteEvent,
    config: &PlaybackConfig,
    precision: u32,
) -> Result<RouteBinding, RouteError> {
    let pairs = decode_with_precision(&event.geometry, precision)?;
    if pairs.len() < 2 {
        return Err(RouteError::DegenerateRoute {
            points: pairs.len(),
        });
    }
    let target = normalize(&pairs)?;
    let camera = synthesize(&target, config.camera_offset_km);
    let geometry = RouteGeometry::new(target, camera)?;
    Ok(RouteBinding {
        route_id: Uuid::new_v4(),
        geometry,
        eta: eta_display(event.duration_seconds),
    })
}

/// Overlay coordinates for a route that decodes to a single point. Such a
/// route cannot be animated but can still be shown.
pub fn fallback_overlay(event: &RouteEvent, precision: u32) -> Option<Vec<[f64; 2]>> {
    let pairs = decode_with_precision(&event.geometry, precision).ok()?;
    let path = normalize(&pairs).ok()?;
    (path.len() == 1).then(|| path.to_lon_lat())
}

pub fn eta_display(duration_seconds: f64) -> EtaDisplay {
    let seconds = if duration_seconds.is_finite() {
        duration_seconds.max(0.0)
    } else {
        0.0
    };
    let minutes = (seconds / 60.0 * 100.0).round() / 100.0;
    EtaDisplay {
        minutes,
        label: format!("{minutes:.2} min"),
    }
}
