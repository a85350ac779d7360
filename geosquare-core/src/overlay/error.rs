#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("rendering surface is not available: {0}")]
    Unavailable(String),
    #[error("rendering surface rejected {element}: {message}")]
    Rejected {
        element: &'static str,
        message: String,
    },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum OverlayError {
    #[error("map surface unavailable: {0}")]
    SurfaceUnavailable(String),
}

impl From<SurfaceError> for OverlayError {
    fn from(value: SurfaceError) -> Self {
        OverlayError::SurfaceUnavailable(value.to_string())
    }
}
