//! Simulated GPIO backend
//!
//! Tracks pin mode and level in memory so motors can be exercised without
//! a board attached. Every header number is accepted, including power and
//! ground positions, since nothing physical is being driven.
//!
//! [`SimGpio`] is a cheap handle: clones share the same state, so a test
//! can keep one clone for inspection while the controller owns another.

#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use l293d_hal::{GpioBackend, GpioError, Level};
use log::trace;

/// A single recorded pin write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Write {
    /// Header pin number
    pub pin: u8,
    /// Level written
    pub level: Level,
}

#[derive(Debug, Default)]
struct SimState {
    outputs: BTreeSet<u8>,
    levels: BTreeMap<u8, Level>,
    history: Vec<Write>,
    /// Pins whose operations fail, for exercising error paths
    faulty: BTreeSet<u8>,
    cleanups: usize,
}

/// Simulated GPIO backend
#[derive(Debug, Clone, Default)]
pub struct SimGpio {
    state: Arc<Mutex<SimState>>,
}

impl SimGpio {
    /// Create a new simulated backend with no pins configured
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every operation on `pin` fail with [`GpioError::Io`]
    pub fn inject_fault(&self, pin: u8) {
        self.lock().faulty.insert(pin);
    }

    /// Current level of a pin, if it has ever been driven
    pub fn level(&self, pin: u8) -> Option<Level> {
        self.lock().levels.get(&pin).copied()
    }

    /// Check if a pin currently reads high
    pub fn is_high(&self, pin: u8) -> bool {
        self.level(pin) == Some(Level::High)
    }

    /// Check if a pin currently reads low
    ///
    /// A pin that was never driven is not considered low.
    pub fn is_low(&self, pin: u8) -> bool {
        self.level(pin) == Some(Level::Low)
    }

    /// Check if a pin is configured as an output
    pub fn is_output(&self, pin: u8) -> bool {
        self.lock().outputs.contains(&pin)
    }

    /// All writes since creation (or the last [`SimGpio::clear_history`])
    pub fn history(&self) -> Vec<Write> {
        self.lock().history.clone()
    }

    /// Forget recorded writes, keeping pin state
    pub fn clear_history(&self) {
        self.lock().history.clear();
    }

    /// Number of times `cleanup` has been called
    pub fn cleanup_count(&self) -> usize {
        self.lock().cleanups
    }
}

impl GpioBackend for SimGpio {
    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError> {
        let mut state = self.lock();
        if state.faulty.contains(&pin) {
            return Err(GpioError::Io(pin));
        }
        trace!("sim: pin {} -> output", pin);
        state.outputs.insert(pin);
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        let mut state = self.lock();
        if state.faulty.contains(&pin) {
            return Err(GpioError::Io(pin));
        }
        if !state.outputs.contains(&pin) {
            return Err(GpioError::NotOutput(pin));
        }
        trace!("sim: pin {} <- {:?}", pin, level);
        state.levels.insert(pin, level);
        state.history.push(Write { pin, level });
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), GpioError> {
        let mut state = self.lock();
        state.outputs.clear();
        state.levels.clear();
        state.cleanups += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_requires_output() {
        let mut gpio = SimGpio::new();
        assert_eq!(gpio.write(5, Level::High), Err(GpioError::NotOutput(5)));

        gpio.setup_output(5).unwrap();
        gpio.write(5, Level::High).unwrap();
        assert!(gpio.is_high(5));
    }

    #[test]
    fn test_clones_share_state() {
        let inspector = SimGpio::new();
        let mut backend = inspector.clone();

        backend.setup_output(1).unwrap();
        backend.write(1, Level::Low).unwrap();

        assert!(inspector.is_output(1));
        assert!(inspector.is_low(1));
        assert_eq!(
            inspector.history(),
            vec![Write {
                pin: 1,
                level: Level::Low
            }]
        );
    }

    #[test]
    fn test_undriven_pin_is_neither_high_nor_low() {
        let gpio = SimGpio::new();
        assert_eq!(gpio.level(9), None);
        assert!(!gpio.is_high(9));
        assert!(!gpio.is_low(9));
    }

    #[test]
    fn test_injected_fault() {
        let mut gpio = SimGpio::new();
        gpio.inject_fault(3);
        assert_eq!(gpio.setup_output(3), Err(GpioError::Io(3)));
        assert!(!gpio.is_output(3));
    }

    #[test]
    fn test_clear_history_keeps_levels() {
        let mut gpio = SimGpio::new();
        gpio.setup_output(4).unwrap();
        gpio.write(4, Level::High).unwrap();

        gpio.clear_history();

        assert!(gpio.history().is_empty());
        assert!(gpio.is_high(4));
    }

    #[test]
    fn test_cleanup_resets_pins() {
        let mut gpio = SimGpio::new();
        gpio.setup_output(2).unwrap();
        gpio.write(2, Level::High).unwrap();

        gpio.cleanup().unwrap();

        assert!(!gpio.is_output(2));
        assert_eq!(gpio.level(2), None);
        assert_eq!(gpio.cleanup_count(), 1);
        // History survives cleanup
        assert_eq!(gpio.history().len(), 1);
    }
}
