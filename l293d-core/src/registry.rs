//! Pin reservation
//!
//! Tracks which header pins are held by motors to prevent two motors from
//! driving the same line. Reservations are never released: motors are
//! expected to live as long as the controller that created them.

use heapless::FnvIndexSet;

use crate::error::PinError;

/// Lowest valid header pin
pub const PIN_MIN: u8 = 1;

/// Highest valid header pin
pub const PIN_MAX: u8 = 40;

/// Registry capacity, large enough for every valid pin
const CAPACITY: usize = 64;

/// Check that a pin number is on the header
pub fn validate_pin(pin: u8) -> Result<(), PinError> {
    if (PIN_MIN..=PIN_MAX).contains(&pin) {
        Ok(())
    } else {
        Err(PinError::InvalidPin(pin))
    }
}

/// Set of pins reserved by motors
#[derive(Debug, Clone, Default)]
pub struct PinRegistry {
    reserved: FnvIndexSet<u8, CAPACITY>,
}

impl PinRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            reserved: FnvIndexSet::new(),
        }
    }

    /// Validate a group of pins without reserving them
    ///
    /// Pins are checked in order; for each one the range is checked first,
    /// then whether it is reserved or repeats an earlier pin of the group.
    /// The first failure is returned.
    pub fn check(&self, pins: &[u8]) -> Result<(), PinError> {
        for (i, &pin) in pins.iter().enumerate() {
            validate_pin(pin)?;
            if self.reserved.contains(&pin) || pins[..i].contains(&pin) {
                return Err(PinError::PinInUse(pin));
            }
        }
        Ok(())
    }

    /// Reserve a group of pins
    ///
    /// Either every pin is reserved or, on error, the registry is left
    /// untouched.
    pub fn reserve(&mut self, pins: &[u8]) -> Result<(), PinError> {
        self.check(pins)?;
        for &pin in pins {
            // Capacity exceeds PIN_MAX and every pin was validated above
            let _ = self.reserved.insert(pin);
        }
        Ok(())
    }

    /// Check if a pin is reserved
    pub fn is_reserved(&self, pin: u8) -> bool {
        self.reserved.contains(&pin)
    }

    /// Number of reserved pins
    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    /// Check if nothing is reserved
    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }

    /// Iterate over reserved pins in reservation order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        self.reserved.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_pin_bounds() {
        assert_eq!(validate_pin(0), Err(PinError::InvalidPin(0)));
        assert!(validate_pin(1).is_ok());
        assert!(validate_pin(40).is_ok());
        assert_eq!(validate_pin(41), Err(PinError::InvalidPin(41)));
    }

    #[test]
    fn test_reserve() {
        let mut registry = PinRegistry::new();

        assert!(registry.reserve(&[1, 2, 3]).is_ok());
        assert!(registry.is_reserved(2));
        assert_eq!(registry.len(), 3);

        // Can't reserve an already-held pin
        assert_eq!(registry.reserve(&[4, 2, 5]), Err(PinError::PinInUse(2)));

        // Can reserve different pins
        assert!(registry.reserve(&[4, 5, 6]).is_ok());
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_failed_reserve_is_atomic() {
        let mut registry = PinRegistry::new();

        // 7 and 8 pass, 41 fails: nothing may be held afterwards
        assert_eq!(registry.reserve(&[7, 8, 41]), Err(PinError::InvalidPin(41)));
        assert!(registry.is_empty());
        assert!(!registry.is_reserved(7));
    }

    #[test]
    fn test_duplicate_within_group() {
        let mut registry = PinRegistry::new();
        assert_eq!(registry.reserve(&[9, 10, 9]), Err(PinError::PinInUse(9)));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_errors_reported_in_pin_order() {
        let mut registry = PinRegistry::new();
        registry.reserve(&[1, 2, 3]).unwrap();

        // Pin 2 comes before the out-of-range pin
        assert_eq!(registry.check(&[2, 0, 4]), Err(PinError::PinInUse(2)));
        assert_eq!(registry.check(&[0, 2, 4]), Err(PinError::InvalidPin(0)));
    }

    #[test]
    fn test_iter_in_reservation_order() {
        let mut registry = PinRegistry::new();
        registry.reserve(&[22, 18, 16]).unwrap();
        let mut pins = registry.iter();
        assert_eq!(pins.next(), Some(22));
        assert_eq!(pins.next(), Some(18));
        assert_eq!(pins.next(), Some(16));
        assert_eq!(pins.next(), None);
    }
}
