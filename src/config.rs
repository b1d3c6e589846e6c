use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::grid::{DEFAULT_GRID_SIZE, MAX_GRID_SIZE};
use crate::paint::DEFAULT_GRAYSCALE_STEP;
use crate::raster::MAX_EXPORT_SIDE;

/// Tunables for an [`crate::EditorSession`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct GridConfig {
    /// Grid side at startup
    pub default_size: usize,
    /// Largest accepted grid side; imports are clamped to it
    pub max_size: usize,
    /// Opacity added per grayscale pass
    pub grayscale_step: f32,
    /// Side of one cell in exported pixels
    pub export_cell_px: u32,
    /// Initial picker value
    pub default_color: String,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_GRID_SIZE,
            max_size: MAX_GRID_SIZE,
            grayscale_step: DEFAULT_GRAYSCALE_STEP,
            export_cell_px: 1,
            default_color: "#000000".to_owned(),
        }
    }
}

impl GridConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size < 1 {
            return Err(ConfigError::Invalid("max_size must be at least 1".into()));
        }
        if self.default_size < 1 || self.default_size > self.max_size {
            return Err(ConfigError::Invalid(format!(
                "default_size {} must be between 1 and {}",
                self.default_size, self.max_size
            )));
        }
        if !(self.grayscale_step > 0.0 && self.grayscale_step <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "grayscale_step {} must be in (0, 1]",
                self.grayscale_step
            )));
        }
        if self.export_cell_px < 1 {
            return Err(ConfigError::Invalid("export_cell_px must be at least 1".into()));
        }
        let export_side = u32::try_from(self.max_size)
            .ok()
            .and_then(|size| size.checked_mul(self.export_cell_px));
        if !export_side.is_some_and(|side| side <= MAX_EXPORT_SIDE) {
            return Err(ConfigError::Invalid(format!(
                "max_size {} at export_cell_px {} exceeds {} exported pixels",
                self.max_size, self.export_cell_px, MAX_EXPORT_SIDE
            )));
        }
        Color::from_hex(&self.default_color).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.default_size, 16);
        assert_eq!(config.max_size, 100);
        assert_eq!(config.grayscale_step, 0.1);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GridConfig::from_json_str(r#"{ "default_size": 32 }"#).unwrap();
        assert_eq!(config.default_size, 32);
        assert_eq!(config.max_size, 100);
        assert_eq!(config.default_color, "#000000");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        assert!(matches!(
            GridConfig::from_json_str(r#"{ "default_size": 101 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GridConfig::from_json_str(r#"{ "grayscale_step": 0.0 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GridConfig::from_json_str(r#"{ "default_color": "black" }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(GridConfig::from_json_str("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_export_scale_is_bounded() {
        assert!(matches!(
            GridConfig::from_json_str(r#"{ "default_size": 100, "export_cell_px": 50000000 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            GridConfig::from_json_str(r#"{ "export_cell_px": 164 }"#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(GridConfig::from_json_str(r#"{ "export_cell_px": 163 }"#).is_ok());
        assert!(GridConfig::from_json_str(r#"{ "max_size": 1024, "export_cell_px": 16 }"#).is_ok());
    }
}
