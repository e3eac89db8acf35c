//! Pin validation errors

/// Errors raised while validating or reserving motor pins
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Pin number outside the header range (1-40)
    #[error("GPIO pin number needs to be between 1 and 40 inclusively, got {0}")]
    InvalidPin(u8),
    /// Pin already reserved by another motor (or repeated in the same triple)
    #[error("GPIO pin {0} already in use")]
    PinInUse(u8),
}

impl PinError {
    /// The pin number that caused the error
    pub fn pin(self) -> u8 {
        match self {
            PinError::InvalidPin(pin) | PinError::PinInUse(pin) => pin,
        }
    }
}
