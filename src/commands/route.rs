use crate::core::route::service::{fallback_overlay, prepare_route};
use crate::domain::error::RouteError;
use crate::domain::models::{AppError, EtaDisplay, RouteEvent};
use crate::infra::clock::tokio_host::HostEvent;
use crate::state::RuntimeState;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub route_id: String,
    pub points: usize,
    pub eta: EtaDisplay,
}

/// Prepares the route off the loop and hands it over. A route that fails to
/// decode never reaches the session, so the current animation keeps playing.
pub fn submit_route(state: &RuntimeState, event: RouteEvent) -> Result<RouteSummary, AppError> {
    let (playback, precision) = {
        let settings = state.settings()?;
        (
            settings.playback.clone(),
            settings.routing.geometry_precision,
        )
    };
    let binding = match prepare_route(&event, &playback, precision) {
        Ok(binding) => binding,
        Err(error) => {
            tracing::warn!("route rejected: {error}");
            if matches!(error, RouteError::DegenerateRoute { .. }) {
                if let Some(coordinates) = fallback_overlay(&event, precision) {
                    state.send(HostEvent::ShowFallback(coordinates))?;
                }
            }
            return Err(error.into());
        }
    };
    let summary = RouteSummary {
        route_id: binding.route_id.to_string(),
        points: binding.geometry.target().len(),
        eta: binding.eta.clone(),
    };
    state.send(HostEvent::Bind(binding))?;
    Ok(summary)
}

pub fn teardown_route(state: &RuntimeState) -> Result<(), AppError> {
    state.send(HostEvent::Teardown)
}

pub fn shutdown(state: &RuntimeState) -> Result<(), AppError> {
    state.send(HostEvent::Shutdown)
}
