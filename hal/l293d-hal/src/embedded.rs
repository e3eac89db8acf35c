//! Backend over `embedded-hal` output pins
//!
//! Lets any HAL that implements [`embedded_hal::digital::OutputPin`] drive
//! the motors. Pins are registered under their header number, after which
//! the map behaves like any other [`GpioBackend`].
//!
//! ```ignore
//! let mut map: PinMap<Output<'static>, 8> = PinMap::new();
//! map.insert(22, enable)?;
//! map.insert(18, ccw)?;
//! map.insert(16, cw)?;
//! ```

use embedded_hal::digital::{OutputPin, PinState};
use heapless::FnvIndexMap;

use crate::gpio::{GpioBackend, GpioError, Level};

struct Slot<P> {
    pin: P,
    /// Set once `setup_output` has been called for this pin
    configured: bool,
}

/// Header-number keyed collection of output pins
///
/// `N` bounds the number of pins and must be a power of two.
pub struct PinMap<P, const N: usize> {
    pins: FnvIndexMap<u8, Slot<P>, N>,
}

impl<P: OutputPin, const N: usize> Default for PinMap<P, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: OutputPin, const N: usize> PinMap<P, N> {
    /// Create an empty pin map
    pub fn new() -> Self {
        Self {
            pins: FnvIndexMap::new(),
        }
    }

    /// Register a pin under its header number
    ///
    /// Replacing an existing entry returns the previous pin. Fails with
    /// [`GpioError::UnsupportedPin`] when the map is full.
    pub fn insert(&mut self, header_pin: u8, pin: P) -> Result<Option<P>, GpioError> {
        let slot = Slot {
            pin,
            configured: false,
        };
        match self.pins.insert(header_pin, slot) {
            Ok(previous) => Ok(previous.map(|s| s.pin)),
            Err(_) => Err(GpioError::UnsupportedPin(header_pin)),
        }
    }

    /// Check whether a header pin has been set up as an output
    pub fn is_configured(&self, header_pin: u8) -> bool {
        self.pins
            .get(&header_pin)
            .map(|s| s.configured)
            .unwrap_or(false)
    }

    /// Number of registered pins
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    /// Check if no pins are registered
    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}

fn drive<P: OutputPin>(pin: &mut P, header_pin: u8, level: Level) -> Result<(), GpioError> {
    pin.set_state(PinState::from(level.is_high()))
        .map_err(|_| GpioError::Io(header_pin))
}

impl<P: OutputPin, const N: usize> GpioBackend for PinMap<P, N> {
    fn setup_output(&mut self, pin: u8) -> Result<(), GpioError> {
        let slot = self
            .pins
            .get_mut(&pin)
            .ok_or(GpioError::UnsupportedPin(pin))?;
        // Output pins start low so the H-bridge stays disabled
        drive(&mut slot.pin, pin, Level::Low)?;
        slot.configured = true;
        Ok(())
    }

    fn write(&mut self, pin: u8, level: Level) -> Result<(), GpioError> {
        let slot = self
            .pins
            .get_mut(&pin)
            .ok_or(GpioError::UnsupportedPin(pin))?;
        if !slot.configured {
            return Err(GpioError::NotOutput(pin));
        }
        drive(&mut slot.pin, pin, level)
    }

    fn cleanup(&mut self) -> Result<(), GpioError> {
        let mut result = Ok(());
        for (header_pin, slot) in self.pins.iter_mut() {
            if !slot.configured {
                continue;
            }
            // Keep going so one bad pin doesn't leave the others driven
            if let Err(e) = drive(&mut slot.pin, *header_pin, Level::Low) {
                result = Err(e);
            }
            slot.configured = false;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock output pin for testing
    struct MockPin {
        high: bool,
        broken: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: true,
                broken: false,
            }
        }

        fn broken() -> Self {
            Self {
                high: false,
                broken: true,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }
    }

    fn level_of(map: &PinMap<MockPin, 8>, pin: u8) -> bool {
        map.pins.get(&pin).unwrap().pin.high
    }

    #[test]
    fn test_setup_drives_low() {
        let mut map: PinMap<MockPin, 8> = PinMap::new();
        map.insert(22, MockPin::new()).unwrap();

        assert!(!map.is_configured(22));
        map.setup_output(22).unwrap();
        assert!(map.is_configured(22));
        assert!(!level_of(&map, 22));
    }

    #[test]
    fn test_write_requires_setup() {
        let mut map: PinMap<MockPin, 8> = PinMap::new();
        map.insert(16, MockPin::new()).unwrap();

        assert_eq!(map.write(16, Level::High), Err(GpioError::NotOutput(16)));

        map.setup_output(16).unwrap();
        map.write(16, Level::High).unwrap();
        assert!(level_of(&map, 16));
    }

    #[test]
    fn test_unknown_pin() {
        let mut map: PinMap<MockPin, 8> = PinMap::new();
        assert_eq!(map.setup_output(3), Err(GpioError::UnsupportedPin(3)));
        assert_eq!(map.write(3, Level::Low), Err(GpioError::UnsupportedPin(3)));
    }

    #[test]
    fn test_hardware_failure_maps_to_io() {
        let mut map: PinMap<MockPin, 8> = PinMap::new();
        map.insert(18, MockPin::broken()).unwrap();
        assert_eq!(map.setup_output(18), Err(GpioError::Io(18)));
    }

    #[test]
    fn test_cleanup_releases_outputs() {
        let mut map: PinMap<MockPin, 8> = PinMap::new();
        map.insert(22, MockPin::new()).unwrap();
        map.insert(18, MockPin::new()).unwrap();
        map.setup_output(22).unwrap();
        map.write(22, Level::High).unwrap();

        map.cleanup().unwrap();

        assert!(!level_of(&map, 22));
        assert!(!map.is_configured(22));
        // Never configured, so left untouched
        assert!(level_of(&map, 18));
    }

    #[test]
    fn test_capacity() {
        let mut map: PinMap<MockPin, 2> = PinMap::new();
        map.insert(1, MockPin::new()).unwrap();
        map.insert(2, MockPin::new()).unwrap();
        assert_eq!(
            map.insert(3, MockPin::new()).map(|_| ()),
            Err(GpioError::UnsupportedPin(3))
        );
        assert_eq!(map.len(), 2);
    }
}
