//! # Configuration Management
//!
//! This module handles loading and parsing configuration from the als-viewer.toml file.
//! It provides a centralized way to configure where reports are read from, where
//! rendered images go, the canvas size, and the tolerance bands each metric is
//! checked against.

use crate::tolerance::{MetricSpec, ToleranceBand};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Default config file, looked up in the working directory
pub const CONFIG_FILE: &str = "als-viewer.toml";

/// Application configuration loaded from als-viewer.toml
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Report discovery and output locations
    pub reports: ReportsConfig,
    /// Canvas and terminal preview settings
    pub display: DisplayConfig,
    /// Expected value and band for each metric
    pub tolerances: ToleranceConfig,
}

/// Report input and output locations
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ReportsConfig {
    /// Directory scanned for `*.json` reports
    pub directory: PathBuf,
    /// Directory rendered PNG files are written to
    pub output_dir: PathBuf,
}

/// Rendering configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Edge length of the square canvas in pixels
    pub canvas_size: u32,
    /// Height of the ASCII preview in rows (0 disables it)
    pub ascii_rows: usize,
    /// Wait for Enter between reports
    pub interactive: bool,
}

/// Expectations for the four report metrics
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
pub struct ToleranceConfig {
    pub center_x: MetricSpec,
    pub center_y: MetricSpec,
    pub radius: MetricSpec,
    pub z_axis: MetricSpec,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        ToleranceConfig {
            center_x: MetricSpec::new(0.0, ToleranceBand::symmetric(0.05)),
            center_y: MetricSpec::new(0.0, ToleranceBand::symmetric(0.05)),
            radius: MetricSpec::new(0.5, ToleranceBand::minimum()),
            z_axis: MetricSpec::new(1.0, ToleranceBand::symmetric(0.01)),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reports: ReportsConfig {
                directory: PathBuf::from("./reports/"),
                output_dir: PathBuf::from("./rendered/"),
            },
            display: DisplayConfig {
                canvas_size: 1024,
                ascii_rows: 32,
                interactive: true,
            },
            tolerances: ToleranceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from als-viewer.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<Config>(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Invalid config file format in {}: {}", path.display(), e);
                    warn!("Using default configuration");
                    Self::default()
                }
            },
            Err(_) => {
                info!("No config file at {}, using default configuration", path.display());
                Self::default()
            }
        }
    }

    /// Save current configuration to the given path
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(&path, contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Save current configuration to als-viewer.toml
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to_path(CONFIG_FILE)
    }

    /// Replace the reports directory, e.g. from the command line
    pub fn with_reports_dir<P: Into<PathBuf>>(mut self, directory: P) -> Self {
        self.reports.directory = directory.into();
        self
    }
}
