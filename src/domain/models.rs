use crate::domain::error::RouteError;
use crate::domain::geo::CameraPose;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Route resolved by the routing collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEvent {
    pub geometry: String,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtaDisplay {
    pub minutes: f64,
    pub label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackConfig {
    pub cycle_duration_ms: f64,
    pub restart_delay_ms: f64,
    pub camera_altitude_m: f64,
    pub pitch_degrees: f64,
    pub bearing_trim_degrees: f64,
    pub camera_offset_km: f64,
    pub frame_interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewConfig {
    pub style_url: String,
    pub center: [f64; 2],
    pub zoom: f64,
    pub access_token: Option<String>,
    pub navigation_control: ControlPosition,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    pub profile: RoutingProfile,
    pub units: DistanceUnits,
    pub geometry_precision: u32,
    pub show_inputs: bool,
    pub show_instructions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingProfile {
    Driving,
    DrivingTraffic,
    Walking,
    Cycling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceUnits {
    Metric,
    Imperial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// One emitted pose, as streamed to the camera collaborator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoseFrame {
    pub route_id: String,
    pub generation: u64,
    pub phase: f64,
    pub pose: CameraPose,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct AppError {
    pub code: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl AppError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        suggestion: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion,
        }
    }
}

impl From<RouteError> for AppError {
    fn from(error: RouteError) -> Self {
        match &error {
            RouteError::Decode(_) => AppError::new(
                "ROUTE_DECODE_FAIL",
                error.to_string(),
                Some("check the route geometry is an encoded polyline".to_string()),
            ),
            RouteError::DegenerateRoute { .. } => AppError::new(
                "ROUTE_DEGENERATE",
                error.to_string(),
                Some("request a route between two distinct places".to_string()),
            ),
            _ => AppError::new("ROUTE_INVALID", error.to_string(), None),
        }
    }
}

impl PlaybackConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let mut reasons = Vec::new();
        if !self.cycle_duration_ms.is_finite() || self.cycle_duration_ms <= 0.0 {
            reasons.push(format!(
                "cycleDurationMs must be positive, got {}",
                self.cycle_duration_ms
            ));
        }
        if !self.restart_delay_ms.is_finite() || self.restart_delay_ms < 0.0 {
            reasons.push(format!(
                "restartDelayMs must not be negative, got {}",
                self.restart_delay_ms
            ));
        }
        if !self.camera_offset_km.is_finite() || self.camera_offset_km < 0.0 {
            reasons.push(format!(
                "cameraOffsetKm must not be negative, got {}",
                self.camera_offset_km
            ));
        }
        if self.frame_interval_ms == 0 {
            reasons.push("frameIntervalMs must be at least 1".to_string());
        }
        if reasons.is_empty() {
            return Ok(());
        }
        Err(AppError::new(
            "INVALID_PLAYBACK_CONFIG",
            reasons.join("; "),
            Some("fix the playback section of the settings file".to_string()),
        ))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            cycle_duration_ms: 110_000.0,
            restart_delay_ms: 1_500.0,
            camera_altitude_m: 4_000.0,
            pitch_degrees: 75.0,
            bearing_trim_degrees: 10.0,
            camera_offset_km: 0.01,
            frame_interval_ms: 16,
        }
    }
}

impl Default for MapViewConfig {
    fn default() -> Self {
        Self {
            style_url: "mapbox://styles/mapbox/streets-v11".to_string(),
            center: [-74.5, 40.0],
            zoom: 9.0,
            access_token: None,
            navigation_control: ControlPosition::TopRight,
        }
    }
}

impl RoutingConfig {
    /// Routes arrive as polyline5 or polyline6; other scales would decode
    /// silently wrong.
    pub fn validate(&self) -> Result<(), AppError> {
        if matches!(self.geometry_precision, 5 | 6) {
            return Ok(());
        }
        Err(AppError::new(
            "INVALID_ROUTING_CONFIG",
            format!(
                "geometryPrecision must be 5 or 6, got {}",
                self.geometry_precision
            ),
            Some("fix the routing section of the settings file".to_string()),
        ))
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            profile: RoutingProfile::Driving,
            units: DistanceUnits::Metric,
            geometry_precision: 5,
            show_inputs: true,
            show_instructions: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, PlaybackConfig, RoutingConfig, RoutingProfile};
    use crate::domain::error::{DecodeError, RouteError};

    #[test]
    fn default_playback_config_is_valid() {
        assert!(PlaybackConfig::default().validate().is_ok());
    }

    #[test]
    fn routing_precision_must_be_polyline5_or_polyline6() {
        assert!(RoutingConfig::default().validate().is_ok());
        let six = RoutingConfig {
            geometry_precision: 6,
            ..RoutingConfig::default()
        };
        assert!(six.validate().is_ok());
        for precision in [0, 4, 7] {
            let config = RoutingConfig {
                geometry_precision: precision,
                ..RoutingConfig::default()
            };
            assert_eq!(config.validate().unwrap_err().code, "INVALID_ROUTING_CONFIG");
        }
    }

    #[test]
    fn invalid_playback_config_lists_every_reason() {
        let config = PlaybackConfig {
            cycle_duration_ms: 0.0,
            restart_delay_ms: -1.0,
            frame_interval_ms: 0,
            ..PlaybackConfig::default()
        };
        let error = config.validate().unwrap_err();
        assert_eq!(error.code, "INVALID_PLAYBACK_CONFIG");
        assert_eq!(error.message.split("; ").count(), 3);
    }

    #[test]
    fn route_errors_map_to_stable_codes() {
        let decode: AppError = RouteError::from(DecodeError::Truncated { index: 3 }).into();
        assert_eq!(decode.code, "ROUTE_DECODE_FAIL");
        let degenerate: AppError = RouteError::DegenerateRoute { points: 1 }.into();
        assert_eq!(degenerate.code, "ROUTE_DEGENERATE");
        let empty: AppError = RouteError::EmptyPath.into();
        assert_eq!(empty.code, "ROUTE_INVALID");
    }

    #[test]
    fn routing_profile_uses_service_names() {
        let raw = serde_json::to_string(&RoutingProfile::DrivingTraffic).unwrap();
        assert_eq!(raw, "\"driving-traffic\"");
    }
}
