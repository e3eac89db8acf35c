//! Motor controller
//!
//! Owns the pin registry and the GPIO backend shared by all motors it
//! creates. Creating a motor validates and reserves its pins in one step,
//! then configures them as outputs.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use l293d_core::config::{ControllerConfig, MotorConfig};
use l293d_core::{MotorPins, PinRegistry};
use l293d_hal::GpioBackend;
use log::{debug, info, warn};

use crate::error::MotorError;
use crate::motor::l293d::lock;
use crate::motor::L293dMotor;

/// Controller behaviour flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControllerSettings {
    /// Skip every backend call; validation and state tracking still run
    pub test_mode: bool,
}

impl From<&ControllerConfig> for ControllerSettings {
    fn from(config: &ControllerConfig) -> Self {
        Self {
            test_mode: config.test_mode,
        }
    }
}

/// Pin-reserving motor factory
pub struct MotorController<G> {
    registry: PinRegistry,
    gpio: Arc<Mutex<G>>,
    settings: ControllerSettings,
}

impl<G: GpioBackend + Send + 'static> MotorController<G> {
    /// Create a controller driving real hardware through `gpio`
    pub fn new(gpio: G) -> Self {
        Self::with_settings(gpio, ControllerSettings::default())
    }

    /// Create a controller with explicit settings
    pub fn with_settings(gpio: G, settings: ControllerSettings) -> Self {
        if settings.test_mode {
            warn!("test mode enabled, GPIO calls are disabled");
        }
        Self {
            registry: PinRegistry::new(),
            gpio: Arc::new(Mutex::new(gpio)),
            settings,
        }
    }

    /// Check if hardware calls are skipped
    pub fn is_test_mode(&self) -> bool {
        self.settings.test_mode
    }

    /// Pins reserved so far
    pub fn registry(&self) -> &PinRegistry {
        &self.registry
    }

    /// Create a motor from enable, anticlockwise and clockwise pins
    pub fn create_motor(
        &mut self,
        enable: u8,
        anticlockwise: u8,
        clockwise: u8,
    ) -> Result<L293dMotor<G>, MotorError> {
        self.motor(MotorPins::new(enable, anticlockwise, clockwise))
    }

    /// Create a motor from a pin triple
    ///
    /// Nothing is reserved if validation fails. If configuring an output
    /// fails afterwards the pins stay reserved, since the registry never
    /// releases pins.
    pub fn motor(&mut self, pins: MotorPins) -> Result<L293dMotor<G>, MotorError> {
        self.registry.reserve(&pins.as_array())?;

        if !self.settings.test_mode {
            let mut gpio = lock(&self.gpio);
            for pin in pins.as_array() {
                gpio.setup_output(pin)?;
                debug!("pin {} configured as output", pin);
            }
        }

        info!("motor created at pins {}", pins);
        Ok(L293dMotor::new(
            pins,
            Arc::clone(&self.gpio),
            self.settings.test_mode,
        ))
    }

    /// Create one motor per config entry, keyed by name
    ///
    /// Stops at the first invalid entry; motors created before it keep
    /// their pins reserved.
    pub fn motors_from_config(
        &mut self,
        motors: &[MotorConfig],
    ) -> Result<BTreeMap<String, L293dMotor<G>>, MotorError> {
        let mut built = BTreeMap::new();
        for config in motors {
            let name = config.name.as_str();
            if built.contains_key(name) {
                return Err(MotorError::DuplicateMotor(name.to_string()));
            }
            let motor = self.motor(config.pins())?;
            built.insert(name.to_string(), motor);
        }
        Ok(built)
    }

    /// Build a controller and its motors from a config
    pub fn from_config(
        gpio: G,
        config: &ControllerConfig,
    ) -> Result<(Self, BTreeMap<String, L293dMotor<G>>), MotorError> {
        let mut controller = Self::with_settings(gpio, ControllerSettings::from(config));
        let motors = controller.motors_from_config(&config.motors)?;
        Ok((controller, motors))
    }

    /// Release every configured pin on the hardware side
    ///
    /// Call once at teardown. The registry keeps its reservations.
    pub fn cleanup(&mut self) -> Result<(), MotorError> {
        if self.settings.test_mode {
            return Ok(());
        }
        debug!("releasing {} GPIO pins", self.registry.len());
        lock(&self.gpio).cleanup()?;
        Ok(())
    }
}
