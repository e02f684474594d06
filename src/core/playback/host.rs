//! Capabilities the playback core borrows from its host: a frame clock, a
//! camera to drive and an overlay to draw the route on.

use crate::domain::models::{EtaDisplay, PoseFrame};

/// Identifies the route binding a scheduled callback belongs to. Callbacks
/// whose generation is no longer current are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickTicket {
    pub generation: u64,
}

pub trait FrameHost {
    /// Call back with a timestamp at the next drawable frame.
    fn request_frame(&mut self, ticket: TickTicket);
    /// Call back once after `delay_ms`.
    fn schedule_restart(&mut self, ticket: TickTicket, delay_ms: f64);
    fn cancel_pending(&mut self);
}

pub trait CameraSink {
    fn set_pose(&mut self, frame: &PoseFrame);
}

pub trait OverlaySink {
    /// Replaces the drawn route; never appends.
    fn replace_route(&mut self, coordinates: &[[f64; 2]]);
    fn show_eta(&mut self, eta: &EtaDisplay);
    fn clear(&mut self);
}
