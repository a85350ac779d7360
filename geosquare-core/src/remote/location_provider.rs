use super::RemoteError;
use crate::model::Coordinate;

/// source of the device's current position.
pub trait LocationProvider {
    fn current_position(&mut self) -> Result<Coordinate, RemoteError>;
}
