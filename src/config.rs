//! Dashboard configuration.
//! Selections a viewer makes, held as an immutable value per interaction.

use crate::charts::ColorTheme;
use crate::stats::DEFAULT_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Threshold must be a non-negative magnitude, got {0}")]
    NegativeThreshold(i64),
}

/// Viewer selections used for one recomputation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Delta magnitude that counts as a gain or a loss.
    pub threshold: i64,
    pub color_theme: ColorTheme,
    /// Year to show; `None` falls back to the dataset's default year.
    pub selected_year: Option<i32>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            color_theme: ColorTheme::default(),
            selected_year: None,
        }
    }
}

impl DashboardConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        debug!(path = %path.display(), ?config, "loaded dashboard config");
        Ok(config)
    }

    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.threshold < 0 {
            return Err(ConfigError::NegativeThreshold(self.threshold));
        }
        Ok(self)
    }

    pub fn with_year(self, year: i32) -> Self {
        Self {
            selected_year: Some(year),
            ..self
        }
    }

    pub fn with_threshold(self, threshold: i64) -> Self {
        Self { threshold, ..self }
    }

    pub fn with_color_theme(self, color_theme: ColorTheme) -> Self {
        Self {
            color_theme,
            ..self
        }
    }
}
