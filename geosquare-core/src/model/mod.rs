mod area_result;
mod bounding_area;
mod coordinate;
mod error;
mod origin;
mod rating;

pub use area_result::AreaResult;
pub use bounding_area::BoundingArea;
pub use coordinate::Coordinate;
pub use error::ModelError;
pub use origin::Origin;
pub use rating::Rating;
