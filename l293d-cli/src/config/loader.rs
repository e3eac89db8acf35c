//! TOML config file parsing
//!
//! ```toml
//! test_mode = false
//!
//! [backend]
//! kind = "sysfs"
//! chip_base = 0
//! sysfs_root = "/sys/class/gpio"
//!
//! [[motor]]
//! name = "left"
//! enable_pin = 22
//! ccw_pin = 18
//! cw_pin = 16
//! ```
//!
//! Every key is optional. Pins are checked when the motors are built, not
//! here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use l293d_core::config::{ControllerConfig, MotorConfig, MAX_MOTORS};
use l293d_hal_linux::SysfsConfig;
use log::{debug, info};
use serde::Deserialize;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Config file is not valid TOML or has the wrong shape
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Command named a motor the config doesn't define
    #[error("no motor named {0:?} in config")]
    UnknownMotor(String),
    /// More motors than a controller holds
    #[error("{0} motors configured, at most {max} supported", max = MAX_MOTORS)]
    TooManyMotors(usize),
}

/// Which GPIO backend drives the pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Kernel sysfs interface
    #[default]
    Sysfs,
    /// In-memory simulation
    Sim,
}

/// `[backend]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// Kernel line number of BCM GPIO 0
    pub chip_base: u32,
    pub sysfs_root: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        let sysfs = SysfsConfig::default();
        Self {
            kind: BackendKind::default(),
            chip_base: sysfs.chip_base,
            sysfs_root: sysfs.root,
        }
    }
}

impl BackendConfig {
    /// sysfs settings for this backend
    pub fn sysfs(&self) -> SysfsConfig {
        SysfsConfig {
            root: self.sysfs_root.clone(),
            chip_base: self.chip_base,
            ..SysfsConfig::default()
        }
    }
}

/// Whole config file
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Skip all hardware calls
    pub test_mode: bool,
    pub backend: BackendConfig,
    #[serde(rename = "motor")]
    pub motors: Vec<MotorConfig>,
}

impl FileConfig {
    /// Controller section of the file
    pub fn controller(&self) -> Result<ControllerConfig, ConfigError> {
        let mut config = ControllerConfig::new();
        config.test_mode = self.test_mode;
        for motor in &self.motors {
            config
                .motors
                .push(motor.clone())
                .map_err(|_| ConfigError::TooManyMotors(self.motors.len()))?;
        }
        Ok(config)
    }
}

/// Parse a config from TOML text
pub fn parse_config(text: &str) -> Result<FileConfig, ConfigError> {
    let config: FileConfig = toml::from_str(text)?;
    log_config_summary(&config);
    Ok(config)
}

/// Read and parse a config file
pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    debug!("loading config from {}", path.display());
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&text)
}

fn log_config_summary(config: &FileConfig) {
    info!(
        "config: {:?} backend, {} motor(s){}",
        config.backend.kind,
        config.motors.len(),
        if config.test_mode { ", test mode" } else { "" }
    );
    for motor in &config.motors {
        debug!("  {} at pins {}", motor.name, motor.pins());
    }
}
