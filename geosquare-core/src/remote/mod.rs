mod error;
mod location_provider;
mod service;

pub use error::RemoteError;
pub use location_provider::LocationProvider;
pub use service::RemoteService;
