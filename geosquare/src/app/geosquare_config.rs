use std::path::Path;

use config::{Config, File};
use geosquare_core::overlay::{MapView, OverlayStyle};
use serde::{Deserialize, Serialize};

use super::GeosquareAppError;

/// settings for the map surface and overlay, read from a TOML file.
/// every key is optional.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct GeosquareConfig {
    /// initial map view
    pub map: MapView,
    /// colors and titles of drawn elements
    pub overlay: OverlayStyle,
}

impl GeosquareConfig {
    pub fn from_file(filepath: &Path) -> Result<Self, GeosquareAppError> {
        let config = Config::builder()
            .add_source(File::from(filepath))
            .build()
            .map_err(|e| {
                let msg = format!("file '{}' produced error: {e}", filepath.display());
                GeosquareAppError::InvalidConfiguration(msg)
            })?;
        let parsed = config.try_deserialize::<GeosquareConfig>().map_err(|e| {
            let msg = format!("error reading '{}': {e}", filepath.display());
            GeosquareAppError::InvalidConfiguration(msg)
        })?;
        parsed.map.center().validate().map_err(|e| {
            GeosquareAppError::InvalidConfiguration(format!("map center: {e}"))
        })?;
        Ok(parsed)
    }

    /// reads the file when given, otherwise uses defaults.
    pub fn from_optional_file(filepath: Option<&Path>) -> Result<Self, GeosquareAppError> {
        match filepath {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
