//! sysfs GPIO backend
//!
//! Layout used under the sysfs root (normally `/sys/class/gpio`):
//!
//! ```text
//! export            write line number to create gpioN/
//! unexport          write line number to remove gpioN/
//! gpioN/direction   "in" | "out" | "low" | "high"
//! gpioN/value       "0" | "1"
//! ```
//!
//! Newer kernels number the SoC lines from a non-zero chip base (512 on
//! recent Raspberry Pi OS releases), which is why the base is configurable.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

use l293d_hal::header;
use l293d_hal::{GpioBackend, GpioError, Level};
use log::{debug, warn};

/// Poll interval while waiting for an exported line to appear
const SETTLE_POLL: Duration = Duration::from_millis(10);

/// sysfs backend configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SysfsConfig {
    /// Directory holding `export`/`unexport`
    pub root: PathBuf,
    /// Kernel line number of BCM GPIO 0
    pub chip_base: u32,
    /// How long to wait for udev to publish an exported line
    pub settle_timeout: Duration,
}

impl Default for SysfsConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/sys/class/gpio"),
            chip_base: 0,
            settle_timeout: Duration::from_secs(1),
        }
    }
}

/// Errors opening the sysfs interface
#[derive(Debug, thiserror::Error)]
pub enum OpenError {
    /// The export file does not exist (no sysfs GPIO on this system)
    #[error("sysfs GPIO interface not found at {0}")]
    Missing(PathBuf),
}

/// GPIO backend over the sysfs interface
#[derive(Debug)]
pub struct SysfsGpio {
    config: SysfsConfig,
    /// Header pin -> kernel line for every pin this backend exported
    exported: BTreeMap<u8, u32>,
}

impl SysfsGpio {
    /// Open the sysfs interface described by `config`
    pub fn open(config: SysfsConfig) -> Result<Self, OpenError> {
        if !config.root.join("export").exists() {
            return Err(OpenError::Missing(config.root));
        }
        debug!(
            "sysfs GPIO at {} (chip base {})",
            config.root.display(),
            config.chip_base
        );
        Ok(Self {
            config,
            exported: BTreeMap::new(),
        })
    }

    /// Kernel line number for a header pin
    pub fn line(&self, pin: u8) -> Result<u32, GpioError> {
        header::bcm_line(pin)
            .and_then(|bcm| self.config.chip_base.checked_add(u32::from(bcm)))
            .ok_or(GpioError::UnsupportedPin(pin))
    }

    fn line_dir(&self, line: u32) -> PathBuf {
        self.config.root.join(format!("gpio{}", line))
    }

    fn wait_for(&self, path: &Path) -> bool {
        let deadline = Instant::now() + self.config.settle_timeout;
        while !path.exists() {
            if Instant::now() >= deadline {
                return false;
            }
            thread::sleep(SETTLE_POLL);
        }
        true
    }
}

fn write_attr(path: &Path, value: &str, pin: u8) -> Result<(), GpioError> {
    fs::write(path, value).map_err(|e: io::Error| {
        warn!("writing {:?} to {} failed: {}", value, path.display(), e);
        GpioError::Io(pin)
    })
}

impl GpioBackend for SysfsGpio {
    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError> {
        let line = self.line(pin)?;
        let dir = self.line_dir(line);

        if !dir.exists() {
            write_attr(&self.config.root.join("export"), &line.to_string(), pin)?;
        }

        let direction = dir.join("direction");
        if !self.wait_for(&direction) {
            warn!("gpio{} did not appear after export", line);
            return Err(GpioError::Io(pin));
        }

        // "low" switches to output with the line already driven low
        write_attr(&direction, "low", pin)?;
        self.exported.insert(pin, line);
        debug!("header pin {} (gpio{}) -> output", pin, line);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        let line = *self.exported.get(&pin).ok_or(GpioError::NotOutput(pin))?;
        let value = if level.is_high() { "1" } else { "0" };
        write_attr(&self.line_dir(line).join("value"), value, pin)
    }

    fn cleanup(&mut self) -> Result<(), GpioError> {
        let unexport = self.config.root.join("unexport");
        let mut result = Ok(());
        for (pin, line) in std::mem::take(&mut self.exported) {
            if let Err(e) = write_attr(&unexport, &line.to_string(), pin) {
                result = Err(e);
            }
        }
        result
    }
}
