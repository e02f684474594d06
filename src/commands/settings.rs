use crate::domain::models::AppError;
use crate::infra::storage::settings_store::{write_settings, SettingsFile};
use crate::state::RuntimeState;
use chrono::Utc;

pub fn load_settings(state: &RuntimeState) -> Result<SettingsFile, AppError> {
    Ok(state.settings()?.clone())
}

/// Validates, persists and swaps in new settings. Playback timing applies to
/// the next session; offset and precision apply to the next route.
pub fn save_settings(state: &RuntimeState, mut settings: SettingsFile) -> Result<(), AppError> {
    settings.validate()?;
    settings.updated_at = Utc::now();
    write_settings(&state.settings_path, &settings)?;
    *state.settings()? = settings;
    Ok(())
}
