//! editor configuration, read from TOML

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const CONFIG_DIR: &str = "circuit-sketch";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// grid pitch used for snapping and the transistor glyph offset
    pub grid_size: f64,
    /// hit-test tolerance for wires
    pub wire_tolerance: f64,
    /// footprint of two terminal devices
    pub device_width: f64,
    pub device_height: f64,
    /// transistors are square
    pub transistor_size: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            grid_size: 20.0,
            wire_tolerance: crate::schematic::wire::DEFAULT_TOLERANCE,
            device_width: 40.0,
            device_height: 20.0,
            transistor_size: 40.0,
        }
    }
}

impl Config {
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Config = toml::from_str(s).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_toml(&s)
    }

    /// path of the per-user config file, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// loads the per-user config file if there is one, defaults otherwise
    pub fn discover() -> Result<Self> {
        match Self::default_path() {
            Some(p) if p.is_file() => {
                log::debug!("reading config from {}", p.display());
                Self::load(&p)
            }
            _ => Ok(Config::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        let sizes = [
            ("device_width", self.device_width),
            ("device_height", self.device_height),
            ("transistor_size", self.transistor_size),
        ];
        for (name, v) in sizes {
            if !(v.is_finite() && v > 0.0) {
                return Err(Error::Config(format!("{name} must be positive, got {v}")));
            }
        }
        if !(self.grid_size.is_finite() && self.grid_size >= 0.0) {
            return Err(Error::Config(format!(
                "grid_size must not be negative, got {}",
                self.grid_size
            )));
        }
        if !(self.wire_tolerance.is_finite() && self.wire_tolerance >= 0.0) {
            return Err(Error::Config(format!(
                "wire_tolerance must not be negative, got {}",
                self.wire_tolerance
            )));
        }
        Ok(())
    }
}
