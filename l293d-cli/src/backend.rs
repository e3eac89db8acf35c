//! GPIO backend selection

use l293d_hal::{GpioBackend, GpioError, Level};
use l293d_hal_linux::SysfsGpio;
use l293d_hal_sim::SimGpio;
use log::warn;

use crate::config::{BackendConfig, BackendKind};

/// Backend chosen at startup
#[derive(Debug)]
pub enum Backend {
    Sim(SimGpio),
    Sysfs(SysfsGpio),
}

/// An opened backend plus whether hardware calls must be skipped
#[derive(Debug)]
pub struct Opened {
    pub backend: Backend,
    pub test_mode: bool,
}

impl Backend {
    /// Open the configured backend
    ///
    /// `simulate` forces the simulated backend. If the sysfs interface is
    /// missing, falls back to the simulated backend in test mode.
    pub fn open(config: &BackendConfig, simulate: bool) -> Opened {
        if simulate || config.kind == BackendKind::Sim {
            return Opened {
                backend: Backend::Sim(SimGpio::new()),
                test_mode: false,
            };
        }

        match SysfsGpio::open(config.sysfs()) {
            Ok(gpio) => Opened {
                backend: Backend::Sysfs(gpio),
                test_mode: false,
            },
            Err(e) => {
                warn!("{}, falling back to test mode", e);
                Opened {
                    backend: Backend::Sim(SimGpio::new()),
                    test_mode: true,
                }
            }
        }
    }
}

impl GpioBackend for Backend {
    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError> {
        match self {
            Backend::Sim(gpio) => gpio.setup_output(pin),
            Backend::Sysfs(gpio) => gpio.setup_output(pin),
        }
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        match self {
            Backend::Sim(gpio) => gpio.write(pin, level),
            Backend::Sysfs(gpio) => gpio.write(pin, level),
        }
    }

    fn cleanup(&mut self) -> Result<(), GpioError> {
        match self {
            Backend::Sim(gpio) => gpio.cleanup(),
            Backend::Sysfs(gpio) => gpio.cleanup(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_simulate_flag_wins() {
        let opened = Backend::open(&BackendConfig::default(), true);
        assert!(matches!(opened.backend, Backend::Sim(_)));
        assert!(!opened.test_mode);
    }

    #[test]
    fn test_missing_sysfs_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig {
            sysfs_root: dir.path().join("gpio"),
            ..BackendConfig::default()
        };

        let opened = Backend::open(&config, false);
        assert!(matches!(opened.backend, Backend::Sim(_)));
        assert!(opened.test_mode);
    }

    #[test]
    fn test_opens_sysfs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("export"), "").unwrap();
        let config = BackendConfig {
            sysfs_root: dir.path().to_path_buf(),
            ..BackendConfig::default()
        };

        let opened = Backend::open(&config, false);
        assert!(matches!(opened.backend, Backend::Sysfs(_)));
        assert!(!opened.test_mode);
    }

    #[test]
    fn test_delegates_to_sim() {
        let sim = SimGpio::new();
        let mut backend = Backend::Sim(sim.clone());

        backend.setup_output(7).unwrap();
        backend.set_high(7).unwrap();
        assert!(sim.is_high(7));

        backend.cleanup().unwrap();
        assert_eq!(sim.cleanup_count(), 1);
    }
}
