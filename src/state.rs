use crate::domain::models::AppError;
use crate::infra::clock::tokio_host::HostEvent;
use crate::infra::storage::settings_store::SettingsFile;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc::UnboundedSender;

pub struct RuntimeState {
    pub settings_path: PathBuf,
    pub settings: Mutex<SettingsFile>,
    pub events: UnboundedSender<HostEvent>,
}

impl RuntimeState {
    pub fn new(
        settings_path: PathBuf,
        settings: SettingsFile,
        events: UnboundedSender<HostEvent>,
    ) -> Self {
        Self {
            settings_path,
            settings: Mutex::new(settings),
            events,
        }
    }

    pub fn settings(&self) -> Result<MutexGuard<'_, SettingsFile>, AppError> {
        self.settings
            .lock()
            .map_err(|_| AppError::new("STATE_LOCK_ERROR", "failed to lock settings", None))
    }

    pub fn send(&self, event: HostEvent) -> Result<(), AppError> {
        self.events.send(event).map_err(|_| {
            AppError::new(
                "PLAYBACK_UNAVAILABLE",
                "playback loop is not running",
                Some("start playback before sending routes".to_string()),
            )
        })
    }
}
