use std::path::Path;

use clap::{Parser, Subcommand};
use geosquare_core::{
    model::{Coordinate, Origin},
    reconcile::{reconcile, RawResponse},
};
use serde::Serialize;

use super::{replay, GeosquareAppError, GeosquareConfig};

/// Command line tool for reconciling geohash square responses and replaying map sessions
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct GeosquareApp {
    #[command(subcommand)]
    pub op: GeosquareOperation,
}

#[derive(Debug, Clone, Subcommand)]
pub enum GeosquareOperation {
    /// validate and normalize a single raw area response
    Reconcile {
        /// file holding the response as received, either a JSON object or a
        /// JSON string containing the encoded object.
        #[arg(short, long)]
        response_file: String,

        /// latitude of the coordinate that produced the response. when given
        /// with --longitude, the result is treated as a fresh location.
        #[arg(long, requires = "longitude", allow_hyphen_values(true))]
        latitude: Option<f64>,

        /// longitude of the coordinate that produced the response.
        #[arg(long, requires = "latitude", allow_hyphen_values(true))]
        longitude: Option<f64>,
    },
    /// play a JSON script of user actions against canned remote replies and
    /// report the resulting state and drawn overlay
    Replay {
        /// JSON array of replay steps
        #[arg(short, long)]
        script_file: String,

        /// TOML file with map and overlay settings. if not provided, defaults are used.
        #[arg(short, long)]
        configuration_file: Option<String>,
    },
}

impl GeosquareOperation {
    pub fn run(&self) -> Result<(), GeosquareAppError> {
        match self {
            GeosquareOperation::Reconcile {
                response_file,
                latitude,
                longitude,
            } => {
                let filepath = Path::new(response_file);
                let contents = std::fs::read_to_string(filepath).map_err(|e| {
                    GeosquareAppError::ReadError {
                        path: filepath.to_path_buf(),
                        source: e,
                    }
                })?;
                // text that is not JSON at all is handed over as-is so the
                // reconciler reports it as a malformed payload
                let raw = serde_json::from_str::<RawResponse>(&contents)
                    .unwrap_or(RawResponse::Encoded(contents));
                let origin = match (latitude, longitude) {
                    (Some(lat), Some(lon)) => {
                        let coordinate = Coordinate::new(*lat, *lon).map_err(|e| {
                            GeosquareAppError::InvalidUserInput(e.to_string())
                        })?;
                        Origin::FreshLocation { coordinate }
                    }
                    _ => Origin::LookedUp,
                };
                let result = reconcile(raw, origin)?;
                log::info!("reconciled square '{}' from {}", result.label(), response_file);
                print_json(&result)
            }
            GeosquareOperation::Replay {
                script_file,
                configuration_file,
            } => {
                let config =
                    GeosquareConfig::from_optional_file(configuration_file.as_deref().map(Path::new))?;
                let steps = replay::read_script(Path::new(script_file))?;
                log::info!("replaying {} steps from '{script_file}'", steps.len());
                let summary = replay::run_replay(&steps, &config);
                print_json(&summary)
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), GeosquareAppError> {
    let output = serde_json::to_string_pretty(value)
        .map_err(|e| GeosquareAppError::SerializationError(e.to_string()))?;
    println!("{output}");
    Ok(())
}
