#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("latitude {0} must be in range [-90, 90]")]
    InvalidLatitude(f64),
    #[error("longitude {0} must be in range [-180, 180]")]
    InvalidLongitude(f64),
    #[error("{axis} start {start} exceeds {axis} end {end}")]
    InvertedBounds {
        axis: &'static str,
        start: f64,
        end: f64,
    },
    #[error("{axis} bound {value} is not a finite number")]
    NonFiniteBound { axis: &'static str, value: f64 },
    #[error("rating {0} must be in range [1, 10]")]
    RatingOutOfRange(i64),
    #[error("cell label must not be empty")]
    EmptyLabel,
}
