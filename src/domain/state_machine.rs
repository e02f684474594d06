use crate::domain::models::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone)]
pub struct PlaybackMachine {
    state: PlaybackState,
}

impl PlaybackMachine {
    pub fn new() -> Self {
        Self {
            state: PlaybackState::Idle,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn start(&mut self) -> Result<(), AppError> {
        if self.state != PlaybackState::Idle {
            return Err(AppError::new(
                "INVALID_PLAYBACK_STATE",
                "only idle playback can start",
                Some("release the current route first".to_string()),
            ));
        }
        self.state = PlaybackState::Running;
        Ok(())
    }

    pub fn complete_cycle(&mut self) -> Result<(), AppError> {
        if self.state != PlaybackState::Running {
            return Err(AppError::new(
                "INVALID_PLAYBACK_STATE",
                "only running playback can complete a cycle",
                None,
            ));
        }
        self.state = PlaybackState::Paused;
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), AppError> {
        if self.state != PlaybackState::Paused {
            return Err(AppError::new(
                "INVALID_PLAYBACK_STATE",
                "only paused playback can restart",
                None,
            ));
        }
        self.state = PlaybackState::Running;
        Ok(())
    }

    pub fn release(&mut self) {
        self.state = PlaybackState::Idle;
    }
}

impl Default for PlaybackMachine {
    fn default() -> Self {
        Self::new()
    }
}
