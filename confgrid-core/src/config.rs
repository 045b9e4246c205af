//! Configuration system for confgrid.
//!
//! Uses `figment` for layered configuration: defaults -> user config file ->
//! explicit config file -> environment -> CLI overrides. Without any of these
//! sources the defaults reproduce the reference report (population 100,
//! TN 7, FN up to 6, 9-wide fields with 2 decimals).

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::grid::GridBounds;
use crate::metrics::ZeroDivision;
use crate::report::ReportFormat;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfgridConfig {
    pub grid: GridBounds,
    pub metrics: MetricsConfig,
    pub output: OutputConfig,
}

/// Metric computation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// How precision, recall and F1 are reported when their denominator is zero.
    pub zero_division: ZeroDivision,
}

/// Report rendering settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: ReportFormat,
    /// Print the title banner before the text header.
    pub banner: bool,
    /// Field width of text columns.
    pub width: usize,
    /// Decimal places for every numeric field.
    pub decimals: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: ReportFormat::Text,
            banner: false,
            width: 9,
            decimals: 2,
        }
    }
}

/// Widest text column accepted by [`OutputConfig::validate`].
pub const MAX_WIDTH: usize = 64;

/// Most decimal places accepted by [`OutputConfig::validate`].
pub const MAX_DECIMALS: usize = 64;

impl OutputConfig {
    /// Reject field sizes the formatter cannot render.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.width == 0 || self.width > MAX_WIDTH {
            return Err(ConfigError::Invalid {
                message: format!(
                    "output.width must be between 1 and {MAX_WIDTH}, got {}",
                    self.width
                ),
            });
        }
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid {
                message: format!(
                    "output.decimals must be at most {MAX_DECIMALS}, got {}",
                    self.decimals
                ),
            });
        }
        Ok(())
    }
}

impl ConfgridConfig {
    pub fn validate(&self) -> Result<()> {
        self.grid.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Values supplied on the command line. Unset fields leave lower layers intact.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    pub grid: GridOverrides,
    pub metrics: MetricsOverrides,
    pub output: OutputOverrides,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GridOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub true_negatives: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_false_negatives: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct MetricsOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zero_division: Option<ZeroDivision>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct OutputOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ReportFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<bool>,
}

/// Path of the user-level config file (`~/.config/confgrid/config.toml` on Linux).
pub fn user_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("dev", "confgrid", "confgrid")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Assemble the layered figment without extracting it.
///
/// Priority (highest to lowest):
/// 1. CLI overrides
/// 2. Environment variables (prefixed with `CONFGRID_`, `__` separates sections)
/// 3. Explicit config file (must exist)
/// 4. User config (`~/.config/confgrid/config.toml`)
/// 5. Built-in defaults
pub fn build_figment(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> std::result::Result<Figment, ConfigError> {
    let mut figment = Figment::from(Serialized::defaults(ConfgridConfig::default()));

    if let Some(user_config) = user_config_path() {
        if user_config.exists() {
            tracing::debug!(path = %user_config.display(), "merging user config");
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    if let Some(path) = config_file {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        tracing::debug!(path = %path.display(), "merging config file");
        figment = figment.merge(Toml::file(path));
    }

    // CONFGRID_GRID__TOTAL, CONFGRID_METRICS__ZERO_DIVISION, etc.
    figment = figment.merge(Env::prefixed("CONFGRID_").split("__"));

    Ok(figment.merge(Serialized::defaults(overrides)))
}

/// Load and validate configuration from all layers.
pub fn load_config(
    config_file: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<ConfgridConfig> {
    let config: ConfgridConfig = build_figment(config_file, overrides)?
        .extract()
        .map_err(|e| ConfigError::from(Box::new(e)))?;
    config.validate()?;
    tracing::debug!(?config, "configuration loaded");
    Ok(config)
}
