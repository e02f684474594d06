use crate::core::playback::host::{CameraSink, FrameHost, OverlaySink, TickTicket};
use crate::core::playback::session::{FrameOutcome, PlaybackSession};
use crate::core::route::service::RouteBinding;
use crate::domain::state_machine::PlaybackState;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};

#[derive(Debug)]
pub enum HostEvent {
    Bind(RouteBinding),
    ShowFallback(Vec<[f64; 2]>),
    Teardown,
    Frame { ticket: TickTicket, at_ms: f64 },
    Restart { ticket: TickTicket },
    Shutdown,
}

/// Frame clock backed by tokio timers. Every callback is posted back onto the
/// event channel so the session is only ever touched from the loop.
pub struct TokioFrameHost {
    events: UnboundedSender<HostEvent>,
    origin: Instant,
    frame_interval: Duration,
    pending: Vec<JoinHandle<()>>,
}

impl TokioFrameHost {
    pub fn new(events: UnboundedSender<HostEvent>, frame_interval_ms: u64) -> Self {
        Self {
            events,
            origin: Instant::now(),
            frame_interval: Duration::from_millis(frame_interval_ms.max(1)),
            pending: Vec::new(),
        }
    }

    pub fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1_000.0
    }

    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|task| !task.is_finished()).count()
    }

    fn track(&mut self, task: JoinHandle<()>) {
        self.pending.retain(|pending| !pending.is_finished());
        self.pending.push(task);
    }
}

impl FrameHost for TokioFrameHost {
    fn request_frame(&mut self, ticket: TickTicket) {
        let events = self.events.clone();
        let origin = self.origin;
        let interval = self.frame_interval;
        let task = tokio::spawn(async move {
            sleep(interval).await;
            let at_ms = origin.elapsed().as_secs_f64() * 1_000.0;
            let _ = events.send(HostEvent::Frame { ticket, at_ms });
        });
        self.track(task);
    }

    fn schedule_restart(&mut self, ticket: TickTicket, delay_ms: f64) {
        let events = self.events.clone();
        let delay = Duration::from_secs_f64(delay_ms.max(0.0) / 1_000.0);
        let task = tokio::spawn(async move {
            sleep(delay).await;
            let _ = events.send(HostEvent::Restart { ticket });
        });
        self.track(task);
    }

    fn cancel_pending(&mut self) {
        for task in self.pending.drain(..) {
            task.abort();
        }
    }
}

impl Drop for TokioFrameHost {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaybackReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub routes_bound: u64,
    pub frames_emitted: u64,
    pub cycles_completed: u64,
    pub stale_dropped: u64,
}

pub async fn run_playback_loop<C: CameraSink, O: OverlaySink>(
    mut events: UnboundedReceiver<HostEvent>,
    mut host: TokioFrameHost,
    mut session: PlaybackSession,
    camera: &mut C,
    overlay: &mut O,
    max_cycles: Option<u64>,
) -> PlaybackReport {
    let mut report = PlaybackReport {
        started_at: Utc::now(),
        finished_at: Utc::now(),
        routes_bound: 0,
        frames_emitted: 0,
        cycles_completed: 0,
        stale_dropped: 0,
    };

    while let Some(event) = events.recv().await {
        match event {
            HostEvent::Bind(binding) => match session.bind(binding, &mut host, overlay) {
                Ok(_) => report.routes_bound += 1,
                Err(error) => tracing::warn!(code = %error.code, "{}", error.message),
            },
            // A bound route keeps its overlay; the fallback only fills an idle map.
            HostEvent::ShowFallback(coordinates) => {
                if session.state() == PlaybackState::Idle {
                    overlay.replace_route(&coordinates);
                } else {
                    tracing::debug!(
                        generation = session.generation(),
                        "fallback overlay skipped, a route is bound"
                    );
                }
            }
            HostEvent::Teardown => session.teardown(&mut host, overlay),
            HostEvent::Frame { ticket, at_ms } => {
                match session.on_frame(ticket, at_ms, &mut host, camera) {
                    FrameOutcome::Emitted { .. } => report.frames_emitted += 1,
                    FrameOutcome::CycleCompleted => {
                        report.cycles_completed += 1;
                        if max_cycles.is_some_and(|limit| report.cycles_completed >= limit) {
                            tracing::info!(cycles = report.cycles_completed, "cycle limit reached");
                            session.teardown(&mut host, overlay);
                            break;
                        }
                    }
                    FrameOutcome::Stale => report.stale_dropped += 1,
                    FrameOutcome::Idle | FrameOutcome::Ignored => {}
                }
            }
            HostEvent::Restart { ticket } => {
                if ticket.generation != session.generation() {
                    report.stale_dropped += 1;
                }
                session.on_restart(ticket, &mut host);
            }
            HostEvent::Shutdown => {
                session.teardown(&mut host, overlay);
                break;
            }
        }
    }

    report.finished_at = Utc::now();
    tracing::info!(
        frames = report.frames_emitted,
        cycles = report.cycles_completed,
        stale = report.stale_dropped,
        "playback loop finished"
    );
    report
}
