//! Chart Configuration
//! Scale constant, bar geometry and series styling, loaded from JSON.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "ENTRY_EXIT_CHART_CONFIG";
/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "chart_config.json";
/// Largest export width or height accepted, in pixels.
pub const MAX_EXPORT_DIM: u32 = 16_384;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Name and fill color for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesStyle {
    pub name: String,
    pub color: [u8; 3],
}

/// Rendering settings shared by every drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: String,
    /// Pixel height the largest value maps to.
    pub scale_height: f64,
    pub bar_width: f64,
    /// Space between the two bars of one category.
    pub bar_gap: f64,
    /// Space between neighbouring categories.
    pub group_gap: f64,
    pub show_values: bool,
    /// Entries style first, exits style second.
    pub series: [SeriesStyle; 2],
    pub export_width: Option<u32>,
    pub export_height: Option<u32>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Entries vs Exits".to_string(),
            scale_height: 200.0,
            bar_width: 24.0,
            bar_gap: 4.0,
            group_gap: 24.0,
            show_values: true,
            series: [
                SeriesStyle {
                    name: "Entries".to_string(),
                    color: [46, 204, 113], // Green
                },
                SeriesStyle {
                    name: "Exits".to_string(),
                    color: [231, 76, 60], // Red
                },
            ],
            export_width: None,
            export_height: None,
        }
    }
}

impl ChartConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: ChartConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve the config from the environment, the working directory, or defaults.
    ///
    /// A file that exists but cannot be loaded is logged and replaced by defaults.
    pub fn discover() -> Self {
        let candidate = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .or_else(|| {
                let local = PathBuf::from(DEFAULT_CONFIG_FILE);
                local.exists().then_some(local)
            });

        let Some(path) = candidate else {
            return Self::default();
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded chart config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.scale_height.is_finite() || self.scale_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "scale_height must be positive, got {}",
                self.scale_height
            )));
        }
        if !self.bar_width.is_finite() || self.bar_width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bar_width must be positive, got {}",
                self.bar_width
            )));
        }
        for (name, gap) in [("bar_gap", self.bar_gap), ("group_gap", self.group_gap)] {
            if !gap.is_finite() || gap < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be zero or more, got {}",
                    name, gap
                )));
            }
        }
        for (name, dim) in [
            ("export_width", self.export_width),
            ("export_height", self.export_height),
        ] {
            if let Some(dim) = dim {
                if dim == 0 || dim > MAX_EXPORT_DIM {
                    return Err(ConfigError::Invalid(format!(
                        "{} must be between 1 and {}, got {}",
                        name, MAX_EXPORT_DIM, dim
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_scale_is_200() {
        let config = ChartConfig::default();
        assert_eq!(config.scale_height, 200.0);
        assert_eq!(config.series[0].name, "Entries");
        assert_eq!(config.series[1].name, "Exits");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "title": "Gate 3", "scale_height": 300.0 }}"#).unwrap();

        let config = ChartConfig::load(file.path()).unwrap();
        assert_eq!(config.title, "Gate 3");
        assert_eq!(config.scale_height, 300.0);
        assert_eq!(config.bar_width, 24.0);
        assert!(config.show_values);
    }

    #[test]
    fn rejects_non_positive_scale() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "scale_height": 0.0 }}"#).unwrap();

        let err = ChartConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_negative_gap() {
        let config = ChartConfig {
            group_gap: -1.0,
            ..ChartConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_or_oversized_export_size() {
        let zero = ChartConfig {
            export_width: Some(0),
            ..ChartConfig::default()
        };
        assert!(matches!(zero.validate(), Err(ConfigError::Invalid(_))));

        let huge = ChartConfig {
            export_width: Some(40_000),
            export_height: Some(40_000),
            ..ChartConfig::default()
        };
        assert!(matches!(huge.validate(), Err(ConfigError::Invalid(_))));

        let ok = ChartConfig {
            export_width: Some(1024),
            export_height: Some(MAX_EXPORT_DIM),
            ..ChartConfig::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = ChartConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
