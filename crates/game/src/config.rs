//! Session configuration loaded from TOML.
//!
//! Every key is optional; anything missing keeps its default. Movement
//! tuning lives under `[movement]` and key bindings under `[bindings]`:
//!
//! ```toml
//! tick_rate = 120
//! mouse_sensitivity = 1.5
//!
//! [movement]
//! grapple_cooldown_ms = 500
//!
//! [bindings]
//! jump = ["Space", "Mouse1"]
//! ```

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};
use skyrun_physics::MovementConfig;
use thiserror::Error;

use crate::input::KeyBindings;

/// Errors that can occur when loading a session configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulation tick rate (ticks per second).
    pub tick_rate: u32,

    /// Mouse sensitivity.
    pub mouse_sensitivity: f32,

    /// Movement physics configuration.
    pub movement: MovementConfig,

    /// Key bindings.
    pub bindings: KeyBindings,

    /// Overrides the level's spawn point.
    pub spawn_position: Option<Vec3>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            mouse_sensitivity: 2.0,
            movement: MovementConfig::default(),
            bindings: KeyBindings::default(),
            spawn_position: None,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded session config from {}", path.display());
        Ok(config)
    }

    /// Get the time step per tick in seconds.
    pub fn delta_time(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".to_string()));
        }
        if !self.mouse_sensitivity.is_finite() {
            return Err(ConfigError::Invalid(
                "mouse_sensitivity must be finite".to_string(),
            ));
        }
        if self.movement.max_delta <= 0.0 {
            return Err(ConfigError::Invalid(
                "movement.max_delta must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_default() {
        let config = SessionConfig::from_toml_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert!((config.delta_time() - 1.0 / 60.0).abs() < 1e-7);
    }

    #[test]
    fn test_partial_override() {
        let source = r#"
            tick_rate = 120
            spawn_position = [5.0, 12.0, -3.0]

            [movement]
            grapple_cooldown_ms = 500
            grapple_range = 100.0

            [bindings]
            jump = ["Space", "Mouse1"]
        "#;

        let config = SessionConfig::from_toml_str(source).unwrap();
        assert_eq!(config.tick_rate, 120);
        assert_eq!(config.spawn_position, Some(Vec3::new(5.0, 12.0, -3.0)));
        assert_eq!(config.movement.grapple_cooldown_ms, 500);
        assert_eq!(config.movement.grapple_range, 100.0);
        // Untouched movement keys keep their defaults
        assert_eq!(config.movement.gravity, 30.0);
        assert_eq!(config.bindings.jump, vec!["Space", "Mouse1"]);
        assert_eq!(config.bindings.grapple, KeyBindings::default().grapple);
    }

    #[test]
    fn test_zero_tick_rate_rejected() {
        assert!(matches!(
            SessionConfig::from_toml_str("tick_rate = 0"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_bad_type_rejected() {
        assert!(matches!(
            SessionConfig::from_toml_str("tick_rate = \"fast\""),
            Err(ConfigError::Parse(_))
        ));
    }
}
