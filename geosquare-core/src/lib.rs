pub mod model;
pub mod overlay;
pub mod reconcile;
pub mod remote;
pub mod session;
