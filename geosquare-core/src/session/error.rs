use crate::{model::ModelError, overlay::OverlayError, reconcile::ReconcileError};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GeosquareError {
    #[error(transparent)]
    Reconcile(#[from] ReconcileError),
    #[error(transparent)]
    Overlay(#[from] OverlayError),
    #[error("{0}")]
    RemoteCallFailed(String),
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ModelError),
    #[error("device location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("cannot {0} without a displayed square")]
    NothingDisplayed(&'static str),
}
