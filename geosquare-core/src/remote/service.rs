use super::RemoteError;
use crate::model::{Coordinate, Rating};
use crate::reconcile::RawResponse;

/// the spatial indexing service behind the RPC boundary. responses are
/// returned raw; shaping them is the job of [`crate::reconcile::reconcile`].
pub trait RemoteService {
    /// derive or look up the square containing a coordinate.
    fn compute_geohash(&mut self, coordinate: &Coordinate) -> Result<RawResponse, RemoteError>;

    /// derive or look up the square for a cell label.
    fn compute_area(&mut self, label: &str) -> Result<RawResponse, RemoteError>;

    /// persist a quality rating for the square named by `identifier`.
    fn update_rating(&mut self, identifier: &str, rating: Rating) -> Result<(), RemoteError>;
}
