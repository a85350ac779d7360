use serde::{Deserialize, Serialize};

use super::ModelError;

/// a user quality rating for a square, always within [1, 10].
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = ModelError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(ModelError::RatingOutOfRange(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(value: Rating) -> Self {
        value.0
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_bounds() {
        assert_eq!(Rating::try_from(1i64).map(|r| r.value()), Ok(1));
        assert_eq!(Rating::try_from(10i64).map(|r| r.value()), Ok(10));
        assert_eq!(Rating::try_from(0i64), Err(ModelError::RatingOutOfRange(0)));
        assert_eq!(Rating::try_from(11i64), Err(ModelError::RatingOutOfRange(11)));
    }

    #[test]
    fn test_deserialize_rejects_out_of_range() {
        let ok: Result<Rating, _> = serde_json::from_str("7");
        assert!(ok.is_ok());
        let bad: Result<Rating, _> = serde_json::from_str("42");
        assert!(bad.is_err());
    }
}
