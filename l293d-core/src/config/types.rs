//! Controller configuration types
//!
//! Pins are not validated here; validation and reservation happen when the
//! controller builds the motors, so a config with a bad pin still parses
//! and fails with the same error a direct constructor call would.

use heapless::{String, Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::pins::MotorPins;

/// Maximum motors per controller config
pub const MAX_MOTORS: usize = 8;

/// Maximum motor name length
pub const MAX_NAME_LEN: usize = 16;

/// One motor wired to an L293D channel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MotorConfig {
    /// Motor name (e.g., "left", "right", "winch")
    pub name: String<MAX_NAME_LEN>,
    /// Enable pin (L293D pin 1 or 9)
    pub enable_pin: u8,
    /// Anticlockwise input (L293D pin 2 or 10)
    pub ccw_pin: u8,
    /// Clockwise input (L293D pin 7 or 15)
    pub cw_pin: u8,
}

impl MotorConfig {
    /// Pin triple for this motor
    pub fn pins(&self) -> MotorPins {
        MotorPins::new(self.enable_pin, self.ccw_pin, self.cw_pin)
    }
}

/// Controller configuration
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ControllerConfig {
    /// Skip all hardware calls; validation and state tracking still run
    #[cfg_attr(feature = "serde", serde(default))]
    pub test_mode: bool,
    /// Motor definitions
    #[cfg_attr(feature = "serde", serde(default, rename = "motor"))]
    pub motors: Vec<MotorConfig, MAX_MOTORS>,
}

impl ControllerConfig {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a motor by name
    pub fn find_motor(&self, name: &str) -> Option<&MotorConfig> {
        self.motors.iter().find(|m| m.name.as_str() == name)
    }
}
