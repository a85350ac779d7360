use super::RequiredField;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ReconcileError {
    #[error("failed to decode response payload: {0}")]
    MalformedPayload(String),
    #[error("unexpected response shape: field '{0}' is missing or has the wrong type")]
    UnexpectedShape(RequiredField),
    #[error("response describes an invalid area: {0}")]
    InvalidGeometry(String),
}
