//! Configuration system
//!
//! Serializable configuration with TOML and RON file support. The only
//! tunable the collision core itself consumes is the grid cell size; it is
//! supplied at construction and immutable afterward.

use crate::collision::CellSize;
pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Try different formats
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Semantically invalid configuration
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Collision grid configuration
///
/// The cell size should sit near the diameter of a typical participant;
/// too small and movers cross cells every frame, too large and every cell
/// crowds up, degrading the broad phase to brute force.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    /// Cell width in world units
    pub cell_width: f32,

    /// Cell height in world units
    pub cell_height: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_width: 100.0,
            cell_height: 100.0,
        }
    }
}

impl Config for GridConfig {}

impl GridConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_width <= 0.0 || self.cell_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cell size must be positive, got {}x{}",
                self.cell_width, self.cell_height
            )));
        }
        Ok(())
    }

    /// The cell size this configuration describes
    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_width, self.cell_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GridConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cell_size().width, 100.0);
    }

    #[test]
    fn test_validate_rejects_non_positive_cells() {
        let config = GridConfig {
            cell_width: 0.0,
            cell_height: 100.0,
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = GridConfig {
            cell_width: 64.0,
            cell_height: 32.0,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: GridConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.cell_width, 64.0);
        assert_eq!(parsed.cell_height, 32.0);
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        // save_to_file checks the extension before touching the filesystem
        assert!(matches!(
            GridConfig::default().save_to_file("grid.yaml"),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_ron_file_round_trip() {
        let path = std::env::temp_dir().join("grid_engine_config_test.ron");
        let path = path.to_str().unwrap();

        let config = GridConfig {
            cell_width: 48.0,
            cell_height: 48.0,
        };
        config.save_to_file(path).unwrap();
        let loaded = GridConfig::load_from_file(path).unwrap();
        assert_eq!(loaded.cell_width, 48.0);

        let _ = std::fs::remove_file(path);
    }
}
