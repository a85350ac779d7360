use std::path::PathBuf;

use geosquare_core::{reconcile::ReconcileError, session::GeosquareError};

#[derive(thiserror::Error, Debug)]
pub enum GeosquareAppError {
    #[error("Error reading from '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Invalid replay script '{path}': {message}")]
    InvalidScript { path: PathBuf, message: String },
    #[error("Invalid input: {0}")]
    InvalidUserInput(String),
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error(transparent)]
    Session(#[from] GeosquareError),
    #[error("Serializing output failed: {0}")]
    SerializationError(String),
}
