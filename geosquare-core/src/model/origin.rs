use serde::{Deserialize, Serialize};

use super::Coordinate;

/// how a displayed area was requested. a fresh location carries the
/// coordinate that produced it so the position marker can be placed there
/// rather than at the area centroid.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Origin {
    FreshLocation { coordinate: Coordinate },
    LookedUp,
}

impl Origin {
    /// the position marker location, if this origin shows one.
    pub fn position(&self) -> Option<&Coordinate> {
        match self {
            Origin::FreshLocation { coordinate } => Some(coordinate),
            Origin::LookedUp => None,
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Origin::FreshLocation { coordinate } => write!(f, "fresh location {coordinate}"),
            Origin::LookedUp => write!(f, "label lookup"),
        }
    }
}
