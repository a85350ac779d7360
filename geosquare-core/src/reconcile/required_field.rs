use serde::{Deserialize, Serialize};

/// the fields every area response must carry, listed in the order they are
/// checked. the first one found missing is the one reported.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    LatStart,
    LonStart,
    LatEnd,
    LonEnd,
    Label,
}

impl RequiredField {
    pub const CHECK_ORDER: [RequiredField; 5] = [
        RequiredField::LatStart,
        RequiredField::LonStart,
        RequiredField::LatEnd,
        RequiredField::LonEnd,
        RequiredField::Label,
    ];

    /// key of this field in the response object.
    pub fn key(&self) -> &'static str {
        match self {
            RequiredField::LatStart => "lat_start",
            RequiredField::LonStart => "lon_start",
            RequiredField::LatEnd => "lat_end",
            RequiredField::LonEnd => "lon_end",
            RequiredField::Label => "geohash",
        }
    }

    pub fn is_required_key(key: &str) -> bool {
        Self::CHECK_ORDER.iter().any(|f| f.key() == key)
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}
