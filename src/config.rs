//! Game configuration.
//!
//! Defaults reproduce the canonical game: 0.0001° cells anchored at the
//! classroom, a radius-3 interaction square and victory at 8. Any subset of
//! keys can be overridden from a TOML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

/// Cumulative probability thresholds for initial cell contents.
///
/// A uniform roll `r` in `[0, 1)` yields: no token when `r < empty`, a 1 when
/// `r < one`, a 2 when `r < two`, otherwise a 4.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnTable {
    /// Upper bound of the empty band.
    pub empty: f64,
    /// Upper bound of the "1" band.
    pub one: f64,
    /// Upper bound of the "2" band.
    pub two: f64,
}

impl Default for SpawnTable {
    fn default() -> Self {
        Self {
            empty: 0.70,
            one: 0.90,
            two: 0.97,
        }
    }
}

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of one cell, in degrees.
    pub cell_size: f64,
    /// Maximum Chebyshev distance at which the player can interact.
    pub interaction_radius: u32,
    /// Cell value at which the game is won.
    pub victory_threshold: u64,
    /// Where a fresh session places the player.
    pub spawn_origin: GeoPoint,
    /// Initial token distribution.
    pub spawn_table: SpawnTable,
    /// Prefix mixed into every generated cell; the empty seed is the canonical world.
    pub world_seed: String,
    /// Recenter the view on the player after every move.
    pub follow_player: bool,
    /// Half-width, in cells, of the view used before any bounds are supplied.
    pub view_radius: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 1e-4,
            interaction_radius: 3,
            victory_threshold: 8,
            spawn_origin: GeoPoint {
                lat: 36.997936938057016,
                lng: -122.05703507501151,
            },
            spawn_table: SpawnTable::default(),
            world_seed: String::new(),
            follow_player: true,
            view_radius: 8,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML text. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or fails [`Self::validate`].
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Check that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "cell_size must be positive and finite, got {}",
                self.cell_size
            )));
        }
        if !self.spawn_origin.lat.is_finite() || !self.spawn_origin.lng.is_finite() {
            return Err(ConfigError::Invalid("spawn_origin must be finite".to_string()));
        }
        let SpawnTable { empty, one, two } = self.spawn_table;
        if !(0.0 <= empty && empty <= one && one <= two && two <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "spawn thresholds must satisfy 0 <= empty <= one <= two <= 1, got {empty}, {one}, {two}"
            )));
        }
        if self.victory_threshold < 2 || !self.victory_threshold.is_power_of_two() {
            return Err(ConfigError::Invalid(format!(
                "victory_threshold must be a power of two >= 2, got {}",
                self.victory_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GameConfig::from_toml_str("interaction_radius = 5\n").unwrap();
        assert_eq!(config.interaction_radius, 5);
        assert_eq!(config.victory_threshold, 8);
        assert!(config.follow_player);
    }

    #[test]
    fn test_nested_toml() {
        let text = r#"
world_seed = "alt"
victory_threshold = 2048

[spawn_table]
empty = 0.5

[spawn_origin]
lat = 10.0
lng = 20.0
"#;
        let config = GameConfig::from_toml_str(text).unwrap();
        assert_eq!(config.world_seed, "alt");
        assert_eq!(config.victory_threshold, 2048);
        assert!((config.spawn_table.empty - 0.5).abs() < f64::EPSILON);
        assert!((config.spawn_table.one - 0.90).abs() < f64::EPSILON);
        assert!((config.spawn_origin.lng - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_threshold() {
        let result = GameConfig::from_toml_str("victory_threshold = 12\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_bad_cell_size() {
        let result = GameConfig::from_toml_str("cell_size = -1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_unordered_spawn_table() {
        let result = GameConfig::from_toml_str("[spawn_table]\none = 0.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = GameConfig::from_toml_str("cell_size = ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
