use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;
use uinput_device::{AxisRanges, DeviceIdentity};

pub const DEFAULT_CONFIG_PATH: &str = "evdev-writer.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {path}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Axis code {0} is out of range")]
    AxisOutOfRange(u16),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub uinput: UinputConfig,
    pub device: DeviceConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[uinput]`
#[derive(Debug, Clone, Deserialize)]
pub struct UinputConfig {
    pub location: PathBuf,
}

/// `[device]`, everything but the axes is required.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub vendor: u16,
    pub product: u16,
    pub version: u16,
    #[serde(default, rename = "axis")]
    pub axes: Vec<AxisConfig>,
}

/// One `[[device.axis]]` entry. Unlisted axes are `0..=0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AxisConfig {
    pub code: u16,
    #[serde(default)]
    pub min: i32,
    #[serde(default)]
    pub max: i32,
}

/// `[logging]`
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_level() -> String {
    "INFO".into()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
            file: None,
        }
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config: Config = text.parse()?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

impl DeviceConfig {
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.name.clone(), self.vendor, self.product, self.version)
    }

    /// Later entries for the same axis override earlier ones.
    pub fn axis_ranges(&self) -> Result<AxisRanges, ConfigError> {
        let mut ranges = AxisRanges::default();
        for axis in &self.axes {
            ranges
                .set(axis.code, axis.min, axis.max)
                .map_err(|_| ConfigError::AxisOutOfRange(axis.code))?;
        }
        Ok(ranges)
    }
}
