use crate::commands::route::{shutdown, submit_route, teardown_route};
use crate::commands::settings::{load_settings, save_settings};
use crate::core::playback::session::PlaybackSession;
use crate::domain::models::{AppError, RouteEvent};
use crate::infra::clock::tokio_host::{run_playback_loop, PlaybackReport, TokioFrameHost};
use crate::infra::output::sinks::{JsonLinesCamera, LoggingOverlay};
use crate::infra::storage::settings_store::load_or_default_settings;
use crate::state::RuntimeState;
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::unbounded_channel;

#[derive(Debug, Clone)]
pub struct PlayOptions {
    pub route_path: PathBuf,
    pub settings_path: PathBuf,
    pub cycles: u64,
    pub cycle_duration_ms: Option<f64>,
    /// Persist the overrides back to the settings file before playing.
    pub save: bool,
}

/// Plays a route file on a single-threaded runtime, streaming poses to stdout.
pub fn play(options: PlayOptions) -> Result<PlaybackReport, AppError> {
    let mut settings = load_or_default_settings(&options.settings_path)?;
    if let Some(cycle_duration_ms) = options.cycle_duration_ms {
        settings.playback.cycle_duration_ms = cycle_duration_ms;
        settings.playback.validate()?;
    }
    let event = read_route_event(&options.route_path)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| {
            AppError::new(
                "RUNTIME_ERROR",
                format!("failed to start runtime: {error}"),
                None,
            )
        })?;

    runtime.block_on(async move {
        let (tx, rx) = unbounded_channel();
        let host = TokioFrameHost::new(tx.clone(), settings.playback.frame_interval_ms);
        let session = PlaybackSession::new(settings.playback.clone());
        let state = RuntimeState::new(options.settings_path.clone(), settings, tx);
        if options.save {
            save_settings(&state, load_settings(&state)?)?;
            tracing::info!(path = %options.settings_path.display(), "settings saved");
        }

        let summary = submit_route(&state, event)?;
        tracing::info!(
            route_id = %summary.route_id,
            points = summary.points,
            cycles = options.cycles,
            "playback started"
        );

        let mut camera = JsonLinesCamera::new(std::io::stdout());
        let mut overlay = LoggingOverlay::default();
        let playback = run_playback_loop(
            rx,
            host,
            session,
            &mut camera,
            &mut overlay,
            Some(options.cycles.max(1)),
        );
        tokio::pin!(playback);
        let report = tokio::select! {
            report = &mut playback => report,
            Ok(()) = tokio::signal::ctrl_c() => {
                tracing::info!("interrupted, stopping playback");
                teardown_route(&state)?;
                shutdown(&state)?;
                playback.await
            }
        };
        Ok::<_, AppError>(report)
    })
}

pub fn read_route_event(path: &Path) -> Result<RouteEvent, AppError> {
    let raw = std::fs::read_to_string(path).map_err(|error| {
        AppError::new(
            "ROUTE_READ_FAIL",
            format!("failed to read route {}: {error}", path.display()),
            None,
        )
    })?;
    serde_json::from_str::<RouteEvent>(&raw).map_err(|error| {
        AppError::new(
            "ROUTE_PARSE_FAIL",
            format!("failed to parse route: {error}"),
            Some("expected {\"geometry\": \"...\", \"durationSeconds\": 754}".to_string()),
        )
    })
}
