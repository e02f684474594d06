use crate::core::geometry::spherical::{bearing_between, length, normalize_degrees, point_at_distance};
use crate::core::route::service::RouteBinding;
use crate::domain::geo::{CameraPose, CameraPosition, RouteGeometry};
use crate::domain::models::{AppError, EtaDisplay, PlaybackConfig};
use crate::domain::state_machine::{PlaybackMachine, PlaybackState};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub start_time: Option<f64>,
    pub cycle_duration_ms: f64,
    pub restart_delay_ms: f64,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickResult {
    Pose { pose: CameraPose, phase: f64 },
    CycleCompleted,
    Ignored,
}

/// Animation bound to exactly one route. Dropped wholesale when the route is
/// replaced or torn down.
#[derive(Debug, Clone)]
pub struct AnimationDriver {
    route_id: Uuid,
    generation: u64,
    geometry: RouteGeometry,
    eta: EtaDisplay,
    target_length_km: f64,
    camera_length_km: f64,
    machine: PlaybackMachine,
    animation: AnimationState,
    config: PlaybackConfig,
}

impl AnimationDriver {
    pub fn start(
        binding: RouteBinding,
        generation: u64,
        config: PlaybackConfig,
    ) -> Result<Self, AppError> {
        let mut machine = PlaybackMachine::new();
        machine.start()?;
        let target_length_km = length(binding.geometry.target());
        let camera_length_km = length(binding.geometry.camera());
        Ok(Self {
            route_id: binding.route_id,
            generation,
            geometry: binding.geometry,
            eta: binding.eta,
            target_length_km,
            camera_length_km,
            machine,
            animation: AnimationState {
                start_time: None,
                cycle_duration_ms: config.cycle_duration_ms,
                restart_delay_ms: config.restart_delay_ms,
                running: true,
            },
            config,
        })
    }

    pub fn route_id(&self) -> Uuid {
        self.route_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn geometry(&self) -> &RouteGeometry {
        &self.geometry
    }

    pub fn eta(&self) -> &EtaDisplay {
        &self.eta
    }

    pub fn target_length_km(&self) -> f64 {
        self.target_length_km
    }

    pub fn camera_length_km(&self) -> f64 {
        self.camera_length_km
    }

    pub fn state(&self) -> PlaybackState {
        self.machine.state()
    }

    pub fn animation(&self) -> AnimationState {
        self.animation
    }

    pub fn restart_delay_ms(&self) -> f64 {
        self.animation.restart_delay_ms
    }

    pub fn tick(&mut self, timestamp_ms: f64) -> TickResult {
        if self.machine.state() != PlaybackState::Running || !timestamp_ms.is_finite() {
            return TickResult::Ignored;
        }
        let phase = match self.animation.start_time {
            None => {
                self.animation.start_time = Some(timestamp_ms);
                0.0
            }
            Some(start_time) => {
                ((timestamp_ms - start_time) / self.animation.cycle_duration_ms).max(0.0)
            }
        };
        if phase > 1.0 {
            if self.machine.complete_cycle().is_err() {
                return TickResult::Ignored;
            }
            self.animation.start_time = None;
            self.animation.running = false;
            return TickResult::CycleCompleted;
        }
        TickResult::Pose {
            pose: self.pose_at(phase),
            phase,
        }
    }

    /// Both cursors advance by the same fraction of their own path length.
    pub fn pose_at(&self, phase: f64) -> CameraPose {
        let phase = phase.clamp(0.0, 1.0);
        let target_point = point_at_distance(self.geometry.target(), phase * self.target_length_km);
        let camera_point = point_at_distance(self.geometry.camera(), phase * self.camera_length_km);
        let bearing = bearing_between(camera_point, target_point);
        CameraPose {
            position: CameraPosition {
                point: camera_point,
                altitude_m: self.config.camera_altitude_m,
            },
            look_at: target_point,
            pitch_degrees: self.config.pitch_degrees,
            bearing_degrees: normalize_degrees(bearing + self.config.bearing_trim_degrees),
        }
    }

    pub fn restart(&mut self) -> Result<(), AppError> {
        self.machine.restart()?;
        self.animation.start_time = None;
        self.animation.running = true;
        Ok(())
    }

    pub fn release(mut self) {
        self.machine.release();
        self.animation.running = false;
    }
}
