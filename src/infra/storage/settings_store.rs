use crate::domain::models::{AppError, MapViewConfig, PlaybackConfig, RoutingConfig};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE_NAME: &str = "routecam.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsFile {
    #[serde(default)]
    pub playback: PlaybackConfig,
    #[serde(default)]
    pub view: MapViewConfig,
    #[serde(default)]
    pub routing: RoutingConfig,
    pub updated_at: DateTime<Utc>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            playback: PlaybackConfig::default(),
            view: MapViewConfig::default(),
            routing: RoutingConfig::default(),
            updated_at: Utc::now(),
        }
    }
}

impl SettingsFile {
    pub fn validate(&self) -> Result<(), AppError> {
        self.playback.validate()?;
        self.routing.validate()
    }
}

pub fn default_settings_path(dir: &Path) -> PathBuf {
    dir.join(SETTINGS_FILE_NAME)
}

pub fn load_or_default_settings(path: &Path) -> Result<SettingsFile, AppError> {
    if !path.exists() {
        let settings = SettingsFile::default();
        write_settings(path, &settings)?;
        tracing::info!(path = %path.display(), "created default settings");
        return Ok(settings);
    }
    let content = std::fs::read_to_string(path).map_err(|error| {
        AppError::new(
            "SETTINGS_READ_FAIL",
            format!("failed to read settings: {error}"),
            None,
        )
    })?;
    let settings = serde_json::from_str::<SettingsFile>(&content).map_err(|error| {
        AppError::new(
            "SETTINGS_PARSE_FAIL",
            format!("failed to parse settings: {error}"),
            Some(format!("fix or delete {}", path.display())),
        )
    })?;
    settings.validate()?;
    tracing::debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}

pub fn write_settings(path: &Path, settings: &SettingsFile) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|error| {
            AppError::new(
                "SETTINGS_WRITE_FAIL",
                format!("failed to create settings dir: {error}"),
                None,
            )
        })?;
    }
    let raw = serde_json::to_string_pretty(settings).map_err(|error| {
        AppError::new(
            "SETTINGS_WRITE_FAIL",
            format!("failed to serialize settings: {error}"),
            None,
        )
    })?;
    std::fs::write(path, raw).map_err(|error| {
        AppError::new(
            "SETTINGS_WRITE_FAIL",
            format!("failed to write settings: {error}"),
            Some("check disk space and path permissions".to_string()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::{default_settings_path, load_or_default_settings, write_settings, SettingsFile};
    use crate::domain::models::RoutingProfile;

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_settings_path(&dir.path().join("nested"));
        let settings = load_or_default_settings(&path).unwrap();
        assert!(path.exists());
        assert_eq!(settings.playback.cycle_duration_ms, 110_000.0);
        assert_eq!(settings.view.center, [-74.5, 40.0]);
        assert_eq!(settings.routing.geometry_precision, 5);
    }

    #[test]
    fn saved_settings_are_loaded_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_settings_path(dir.path());
        let mut settings = SettingsFile::default();
        settings.playback.pitch_degrees = 60.0;
        settings.routing.profile = RoutingProfile::Cycling;
        write_settings(&path, &settings).unwrap();

        let loaded = load_or_default_settings(&path).unwrap();
        assert_eq!(loaded.playback.pitch_degrees, 60.0);
        assert_eq!(loaded.routing.profile, RoutingProfile::Cycling);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_settings_path(dir.path());
        std::fs::write(&path, r#"{"updatedAt":"2026-01-01T00:00:00Z"}"#).unwrap();
        let loaded = load_or_default_settings(&path).unwrap();
        assert_eq!(loaded.playback.restart_delay_ms, 1_500.0);
    }

    #[test]
    fn malformed_file_reports_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_settings_path(dir.path());
        std::fs::write(&path, "{not json").unwrap();
        let error = load_or_default_settings(&path).unwrap_err();
        assert_eq!(error.code, "SETTINGS_PARSE_FAIL");
    }

    #[test]
    fn invalid_playback_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_settings_path(dir.path());
        let mut settings = SettingsFile::default();
        settings.playback.cycle_duration_ms = -5.0;
        write_settings(&path, &settings).unwrap();
        let error = load_or_default_settings(&path).unwrap_err();
        assert_eq!(error.code, "INVALID_PLAYBACK_CONFIG");
    }

    #[test]
    fn unsupported_geometry_precision_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = default_settings_path(dir.path());
        let mut settings = SettingsFile::default();
        settings.routing.geometry_precision = 7;
        write_settings(&path, &settings).unwrap();
        let error = load_or_default_settings(&path).unwrap_err();
        assert_eq!(error.code, "INVALID_ROUTING_CONFIG");
    }
}
