use crate::core::playback::driver::{AnimationDriver, TickResult};
use crate::core::playback::host::{CameraSink, FrameHost, OverlaySink, TickTicket};
use crate::core::route::service::RouteBinding;
use crate::domain::models::{AppError, PlaybackConfig, PoseFrame};
use crate::domain::state_machine::PlaybackState;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    Emitted { phase: f64 },
    CycleCompleted,
    Stale,
    Idle,
    Ignored,
}

/// Owns the animation for the currently bound route and the generation
/// counter that retires callbacks from earlier bindings.
#[derive(Debug)]
pub struct PlaybackSession {
    config: PlaybackConfig,
    generation: u64,
    driver: Option<AnimationDriver>,
    cycles_completed: u64,
}

impl PlaybackSession {
    pub fn new(config: PlaybackConfig) -> Self {
        Self {
            config,
            generation: 0,
            driver: None,
            cycles_completed: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.driver
            .as_ref()
            .map(AnimationDriver::state)
            .unwrap_or(PlaybackState::Idle)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn route_id(&self) -> Option<Uuid> {
        self.driver.as_ref().map(AnimationDriver::route_id)
    }

    pub fn driver(&self) -> Option<&AnimationDriver> {
        self.driver.as_ref()
    }

    pub fn cycles_completed(&self) -> u64 {
        self.cycles_completed
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    /// Replaces whatever is bound. The previous driver is retired before the
    /// new one exists, so no tick can observe a mix of the two.
    pub fn bind(
        &mut self,
        binding: RouteBinding,
        host: &mut impl FrameHost,
        overlay: &mut impl OverlaySink,
    ) -> Result<TickTicket, AppError> {
        self.retire(host);

        overlay.replace_route(&binding.geometry.target().to_lon_lat());
        overlay.show_eta(&binding.eta);

        let route_id = binding.route_id;
        let target_points = binding.geometry.target().len();
        let driver = AnimationDriver::start(binding, self.generation, self.config.clone())?;
        tracing::info!(
            %route_id,
            generation = self.generation,
            points = target_points,
            target_km = driver.target_length_km(),
            camera_km = driver.camera_length_km(),
            eta = %driver.eta().label,
            "route bound"
        );
        self.driver = Some(driver);
        self.cycles_completed = 0;

        let ticket = TickTicket {
            generation: self.generation,
        };
        host.request_frame(ticket);
        Ok(ticket)
    }

    pub fn teardown(&mut self, host: &mut impl FrameHost, overlay: &mut impl OverlaySink) {
        self.retire(host);
        overlay.clear();
    }

    pub fn on_frame(
        &mut self,
        ticket: TickTicket,
        timestamp_ms: f64,
        host: &mut impl FrameHost,
        camera: &mut impl CameraSink,
    ) -> FrameOutcome {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale frame"
            );
            return FrameOutcome::Stale;
        }
        let Some(driver) = self.driver.as_mut() else {
            return FrameOutcome::Idle;
        };
        match driver.tick(timestamp_ms) {
            TickResult::Pose { pose, phase } => {
                camera.set_pose(&PoseFrame {
                    route_id: driver.route_id().to_string(),
                    generation: ticket.generation,
                    phase,
                    pose,
                });
                host.request_frame(ticket);
                FrameOutcome::Emitted { phase }
            }
            TickResult::CycleCompleted => {
                self.cycles_completed += 1;
                tracing::debug!(
                    route_id = %driver.route_id(),
                    cycles = self.cycles_completed,
                    delay_ms = driver.restart_delay_ms(),
                    "cycle completed, restart scheduled"
                );
                host.schedule_restart(ticket, driver.restart_delay_ms());
                FrameOutcome::CycleCompleted
            }
            TickResult::Ignored => FrameOutcome::Ignored,
        }
    }

    /// Returns whether the animation resumed.
    pub fn on_restart(&mut self, ticket: TickTicket, host: &mut impl FrameHost) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "dropping stale restart"
            );
            return false;
        }
        let Some(driver) = self.driver.as_mut() else {
            return false;
        };
        if let Err(error) = driver.restart() {
            tracing::warn!(code = %error.code, "{}", error.message);
            return false;
        }
        host.request_frame(ticket);
        true
    }

    fn retire(&mut self, host: &mut impl FrameHost) {
        host.cancel_pending();
        self.generation += 1;
        if let Some(previous) = self.driver.take() {
            tracing::debug!(route_id = %previous.route_id(), "route released");
            previous.release();
        }
    }
}
