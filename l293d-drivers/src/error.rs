//! Driver errors

use l293d_core::PinError;
use l293d_hal::GpioError;

/// Errors from motor construction and drive operations
#[derive(Debug, thiserror::Error)]
pub enum MotorError {
    /// Pin number outside the header range (1-40)
    #[error("GPIO pin number needs to be between 1 and 40 inclusively, got {0}")]
    InvalidPin(u8),
    /// Pin already reserved by another motor
    #[error("GPIO pin {0} already in use")]
    PinInUse(u8),
    /// GPIO backend operation failed
    #[error("hardware error: {0}")]
    Hardware(#[from] GpioError),
    /// Two motors in a config share a name
    #[error("motor {0:?} defined more than once")]
    DuplicateMotor(String),
    /// The thread running a timed stop could not be started
    #[error("failed to start stop worker: {0}")]
    Spawn(#[source] std::io::Error),
    /// The thread running a timed stop panicked
    #[error("stop worker panicked")]
    WorkerPanicked,
}

impl From<PinError> for MotorError {
    fn from(e: PinError) -> Self {
        match e {
            PinError::InvalidPin(pin) => MotorError::InvalidPin(pin),
            PinError::PinInUse(pin) => MotorError::PinInUse(pin),
        }
    }
}

impl MotorError {
    /// Check if this is a pin validation error
    pub fn is_pin_error(&self) -> bool {
        matches!(self, MotorError::InvalidPin(_) | MotorError::PinInUse(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pin_errors_convert() {
        let err = MotorError::from(PinError::PinInUse(16));
        assert!(matches!(err, MotorError::PinInUse(16)));
        assert!(err.is_pin_error());
        assert!(MotorError::from(PinError::InvalidPin(0)).is_pin_error());
    }

    #[test]
    fn test_other_errors_are_not_pin_errors() {
        assert!(!MotorError::Hardware(GpioError::Io(3)).is_pin_error());
        assert!(!MotorError::WorkerPanicked.is_pin_error());
    }
}
