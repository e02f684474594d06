use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "routecam", version, about = "Route playback with a chase camera")]
pub struct Cli {
    /// Raise log detail; repeat for trace output.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play a route event file, writing one pose per line to stdout.
    Play {
        /// JSON file: {"geometry": "<encoded>", "durationSeconds": 754}
        #[arg(long)]
        route: PathBuf,
        #[arg(long, default_value = "routecam.json")]
        settings: PathBuf,
        /// Stop after this many completed cycles.
        #[arg(long, default_value_t = 1)]
        cycles: u64,
        /// Override the cycle duration from the settings file.
        #[arg(long)]
        cycle_ms: Option<f64>,
        /// Write the overrides back to the settings file.
        #[arg(long)]
        save: bool,
    },
    /// Decode a polyline into [lon, lat] pairs.
    Decode {
        encoded: String,
        #[arg(long, default_value_t = 5)]
        precision: u32,
    },
    /// Encode a JSON array of [lat, lon] pairs.
    Encode {
        coordinates: String,
        #[arg(long, default_value_t = 5)]
        precision: u32,
    },
    /// Print the effective settings, creating the file if missing.
    Settings {
        #[arg(long, default_value = "routecam.json")]
        settings: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;

    #[test]
    fn play_defaults() {
        let cli = Cli::try_parse_from(["routecam", "play", "--route", "route.json"]).unwrap();
        match cli.command {
            Command::Play {
                cycles,
                settings,
                cycle_ms,
                save,
                ..
            } => {
                assert!(!save);
                assert_eq!(cycles, 1);
                assert_eq!(settings.to_str(), Some("routecam.json"));
                assert!(cycle_ms.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn decode_accepts_precision() {
        let cli = Cli::try_parse_from(["routecam", "decode", "??", "--precision", "6"]).unwrap();
        assert!(matches!(cli.command, Command::Decode { precision: 6, .. }));
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::try_parse_from(["routecam", "-vv", "settings"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
