mod error;
mod raw_response;
mod reconciler;
mod required_field;

pub use error::ReconcileError;
pub use raw_response::RawResponse;
pub use reconciler::reconcile;
pub use required_field::RequiredField;
