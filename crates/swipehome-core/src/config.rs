//! Configuration types.
//!
//! Gesture tuning lives in `config.toml` under the SwipeHome config
//! directory. Every field has a default, so a missing file or a partial
//! file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Gesture and layout tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Settle animation settings shared by both axes.
    pub animation: AnimationConfig,

    /// Opened drawer anchor as a fraction of the viewport width.
    pub drawer_open_fraction: f32,

    /// Expanded card anchor as a fraction of the measured toolbar height.
    pub expanded_ratio: f32,

    /// Frame clock period in milliseconds.
    pub frame_interval_ms: u64,

    /// The card's own drag recognizer is enabled only while the list's
    /// first visible item index is below this value.
    pub direct_drag_max_index: usize,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            animation: AnimationConfig::default(),
            drawer_open_fraction: 0.95,
            expanded_ratio: 0.5,
            frame_interval_ms: 16,
            direct_drag_max_index: 3,
        }
    }
}

impl GestureConfig {
    /// Load from the default config path.
    ///
    /// Returns defaults when no config directory or file exists.
    pub fn load() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                tracing::debug!("No config at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Load and validate a config file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded gesture config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_fraction("drawer_open_fraction", self.drawer_open_fraction)?;
        check_fraction("expanded_ratio", self.expanded_ratio)?;
        if self.expanded_ratio >= 1.0 {
            return Err(ConfigError::Invalid {
                field: "expanded_ratio",
                reason: "must be below 1 so the card anchors differ".to_string(),
            });
        }
        if self.animation.duration_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "animation.duration_ms",
                reason: "must be positive".to_string(),
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "frame_interval_ms",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Frame clock period.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

fn check_fraction(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be in (0, 1], got {}", value),
        })
    }
}

/// Settle animation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of a full settle animation in milliseconds.
    pub duration_ms: u64,

    /// Easing curve.
    pub easing: Easing,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration_ms: 300,
            easing: Easing::default(),
        }
    }
}

impl AnimationConfig {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Easing curve applied to animation time.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Map linear time in [0, 1] to eased progress in [0, 1].
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("swipehome"))
}

/// Get the path to config.toml.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = GestureConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        assert_eq!(config.animation.duration(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = GestureConfig::from_toml_str(
            r#"
            drawer_open_fraction = 0.8

            [animation]
            easing = "linear"
            "#,
        )
        .unwrap();

        assert_eq!(config.drawer_open_fraction, 0.8);
        assert_eq!(config.expanded_ratio, 0.5);
        assert_eq!(config.animation.easing, Easing::Linear);
        assert_eq!(config.animation.duration_ms, 300);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GestureConfig::from_toml_str("drawer_open_fraction = 1.5").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "drawer_open_fraction",
                ..
            }
        ));

        let err = GestureConfig::from_toml_str("expanded_ratio = 1.0").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "expanded_ratio",
                ..
            }
        ));

        let err = GestureConfig::from_toml_str("[animation]\nduration_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = GestureConfig::from_toml_str("drawer_open_fraction = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "frame_interval_ms = 8").unwrap();

        let config = GestureConfig::load_from(file.path()).unwrap();
        assert_eq!(config.frame_interval_ms, 8);
    }

    #[test]
    fn test_load_from_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GestureConfig::load_from(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(2.0), 1.0);
        }
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
    }
}
