//! GPIO backend abstraction
//!
//! Provides the trait through which motors configure and drive their
//! control lines. Implementations handle the platform-specific part.

use core::ops::Not;

/// Logic level of a digital output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Check if this level is high
    pub fn is_high(self) -> bool {
        self == Level::High
    }

    /// Check if this level is low
    pub fn is_low(self) -> bool {
        self == Level::Low
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl Not for Level {
    type Output = Level;

    fn not(self) -> Self::Output {
        match self {
            Level::Low => Level::High,
            Level::High => Level::Low,
        }
    }
}

/// Errors from GPIO backend operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GpioError {
    /// Pin is not a GPIO line (off the header, power or ground)
    #[error("header pin {0} is not a usable GPIO line")]
    UnsupportedPin(u8),
    /// Write to a pin that was never set up as an output
    #[error("pin {0} has not been configured as an output")]
    NotOutput(u8),
    /// Underlying hardware operation failed
    #[error("GPIO operation failed on pin {0}")]
    Io(u8),
}

/// GPIO backend addressed by header pin number
///
/// One backend instance is shared by every motor of a controller, so
/// implementations only need to track state per pin number.
pub trait GpioBackend {
    /// Configure a pin as a digital output
    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError>;

    /// Drive an output pin to the given level
    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError>;

    /// Drive a pin high
    fn set_high(&mut self, pin: u8) -> Result<(), GpioError> {
        self.write(pin, Level::High)
    }

    /// Drive a pin low
    fn set_low(&mut self, pin: u8) -> Result<(), GpioError> {
        self.write(pin, Level::Low)
    }

    /// Release every pin this backend has configured
    ///
    /// Called once at teardown.
    fn cleanup(&mut self) -> Result<(), GpioError>;
}
