//! File-backed settings for every exercise.
//!
//! The whole file is optional and so is every field: missing sections fall
//! back to their defaults, so a config that only sets `[guess] max = 50` is
//! valid.
//!
//! ```
//! use drills_logic::config::{validate_config, DrillsConfig};
//!
//! let config = DrillsConfig::default();
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::guessing::GameSettings;

/// Default chart width in pixels.
pub const DEFAULT_CHART_WIDTH: u32 = 800;

/// Default chart height in pixels.
pub const DEFAULT_CHART_HEIGHT: u32 = 600;

/// Default radius, in pixels, of the marker for the largest size.
pub const DEFAULT_MAX_RADIUS: f64 = 40.0;

/// Smallest chart edge that still leaves room for axes and a caption.
pub const MIN_CHART_EDGE: u32 = 100;

/// Bubble chart output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub width: u32,
    pub height: u32,
    /// Radius of the largest bubble; smaller bubbles scale by area.
    pub max_radius: f64,
    /// Where the rendered SVG is written.
    pub output: String,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CHART_WIDTH,
            height: DEFAULT_CHART_HEIGHT,
            max_radius: DEFAULT_MAX_RADIUS,
            output: "bubbles.svg".to_string(),
        }
    }
}

impl ChartSettings {
    /// Check the settings, returning all errors found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        if self.width < MIN_CHART_EDGE || self.height < MIN_CHART_EDGE {
            errors.push(ConfigError::ChartTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        if !self.max_radius.is_finite() || self.max_radius <= 0.0 {
            errors.push(ConfigError::InvalidRadius(self.max_radius));
        }
        if self.output.trim().is_empty() {
            errors.push(ConfigError::EmptyOutputPath);
        }
        errors
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrillsConfig {
    pub guess: GameSettings,
    pub bubble: ChartSettings,
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("guess range {min}..={max} is empty")]
    EmptyRange { min: i64, max: i64 },
    #[error("max_attempts must be at least 1")]
    ZeroAttempts,
    #[error("target {target} is outside {min}..={max}")]
    TargetOutOfRange { target: i64, min: i64, max: i64 },
    #[error("chart {width}x{height} is too small (minimum {edge}px per edge)", edge = MIN_CHART_EDGE)]
    ChartTooSmall { width: u32, height: u32 },
    #[error("max_radius must be a positive number, got {0}")]
    InvalidRadius(f64),
    #[error("chart output path is empty")]
    EmptyOutputPath,
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &DrillsConfig) -> Vec<ConfigError> {
    let mut errors = config.guess.validate();
    errors.extend(config.bubble.validate());
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&DrillsConfig::default()).is_empty());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DrillsConfig = toml::from_str("[guess]\nmax = 50\n").unwrap();
        assert_eq!(config.guess.min, 1);
        assert_eq!(config.guess.max, 50);
        assert_eq!(config.guess.max_attempts, 10);
        assert_eq!(config.guess.seed, None);
        assert_eq!(config.bubble, ChartSettings::default());
    }

    #[test]
    fn test_full_toml() {
        let config: DrillsConfig = toml::from_str(
            r#"
            [guess]
            min = 10
            max = 20
            max_attempts = 3
            seed = 7

            [bubble]
            width = 400
            height = 300
            max_radius = 25.0
            output = "out/chart.svg"
            "#,
        )
        .unwrap();
        assert_eq!(config.guess.seed, Some(7));
        assert_eq!(config.bubble.width, 400);
        assert_eq!(config.bubble.output, "out/chart.svg");
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn test_empty_file_is_default() {
        let config: DrillsConfig = toml::from_str("").unwrap();
        assert_eq!(config, DrillsConfig::default());
    }

    #[test]
    fn test_all_errors_reported() {
        let config = DrillsConfig {
            guess: GameSettings {
                min: 5,
                max: 1,
                max_attempts: 0,
                seed: None,
            },
            bubble: ChartSettings {
                width: 0,
                height: 600,
                max_radius: -1.0,
                output: "  ".into(),
            },
        };
        let errors = validate_config(&config);
        assert_eq!(
            errors,
            vec![
                ConfigError::EmptyRange { min: 5, max: 1 },
                ConfigError::ZeroAttempts,
                ConfigError::ChartTooSmall {
                    width: 0,
                    height: 600
                },
                ConfigError::InvalidRadius(-1.0),
                ConfigError::EmptyOutputPath,
            ]
        );
    }

    #[test]
    fn test_nan_radius_rejected() {
        let bubble = ChartSettings {
            max_radius: f64::NAN,
            ..ChartSettings::default()
        };
        assert_eq!(bubble.validate().len(), 1);
    }
}
