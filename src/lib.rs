pub mod cli;
pub mod commands;
pub mod core;
pub mod domain;
pub mod infra;
pub mod state;

use clap::Parser;
use cli::{Cli, Command};
use commands::playback::{play, PlayOptions};
use commands::polyline::{decode_route, encode_route};
use domain::models::AppError;
use infra::logging::init_tracing;
use infra::storage::settings_store::load_or_default_settings;

pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Play {
            route,
            settings,
            cycles,
            cycle_ms,
            save,
        } => {
            let report = play(PlayOptions {
                route_path: route,
                settings_path: settings,
                cycles,
                cycle_duration_ms: cycle_ms,
                save,
            })?;
            tracing::info!(
                frames = report.frames_emitted,
                cycles = report.cycles_completed,
                "done"
            );
        }
        Command::Decode { encoded, precision } => {
            print_json(&decode_route(&encoded, precision)?)?;
        }
        Command::Encode {
            coordinates,
            precision,
        } => {
            println!("{}", encode_route(&coordinates, precision)?);
        }
        Command::Settings { settings } => {
            print_json(&load_or_default_settings(&settings)?)?;
        }
    }
    Ok(())
}

fn print_json(value: &impl serde::Serialize) -> Result<(), AppError> {
    let raw = serde_json::to_string_pretty(value).map_err(|error| {
        AppError::new(
            "SERDE_ERROR",
            format!("failed to serialize output: {error}"),
            None,
        )
    })?;
    println!("{raw}");
    Ok(())
}
