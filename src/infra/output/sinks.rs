use crate::core::playback::host::{CameraSink, OverlaySink};
use crate::domain::models::{EtaDisplay, PoseFrame};
use std::io::Write;

/// Streams each pose as one JSON object per line.
pub struct JsonLinesCamera<W: Write> {
    writer: W,
    write_failed: bool,
}

impl<W: Write> JsonLinesCamera<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            write_failed: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_frame(&mut self, frame: &PoseFrame) -> Result<(), std::io::Error> {
        serde_json::to_writer(&mut self.writer, frame)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> CameraSink for JsonLinesCamera<W> {
    fn set_pose(&mut self, frame: &PoseFrame) {
        if let Err(error) = self.write_frame(frame) {
            // Report once; a closed pipe would otherwise log every frame.
            if !self.write_failed {
                tracing::warn!("failed to write camera pose: {error}");
            }
            self.write_failed = true;
        }
    }
}

/// Overlay collaborator that only records what it was asked to draw.
#[derive(Debug, Default)]
pub struct LoggingOverlay {
    points: usize,
    eta: Option<EtaDisplay>,
}

impl LoggingOverlay {
    pub fn points(&self) -> usize {
        self.points
    }

    pub fn eta(&self) -> Option<&EtaDisplay> {
        self.eta.as_ref()
    }
}

impl OverlaySink for LoggingOverlay {
    fn replace_route(&mut self, coordinates: &[[f64; 2]]) {
        self.points = coordinates.len();
        tracing::info!(points = self.points, "route overlay replaced");
    }

    fn show_eta(&mut self, eta: &EtaDisplay) {
        tracing::info!(minutes = eta.minutes, "estimated time {}", eta.label);
        self.eta = Some(eta.clone());
    }

    fn clear(&mut self) {
        self.points = 0;
        self.eta = None;
        tracing::debug!("route overlay cleared");
    }
}
