//! Direction and motor state
//!
//! A motor is always in one of three states. Any drive command moves it
//! directly to the matching state, including a straight reversal from one
//! spinning direction to the other without stopping first.

use crate::pins::PinRole;

/// Drive direction
///
/// The discriminant is the signed drive value: the sign is the rotation
/// polarity and zero means stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[repr(i8)]
pub enum Direction {
    /// Anticlockwise rotation
    Anticlockwise = -1,
    /// Enable line low, motor coasts
    Stop = 0,
    /// Clockwise rotation
    Clockwise = 1,
}

impl Direction {
    /// Signed drive value
    pub fn as_i8(self) -> i8 {
        self as i8
    }

    /// Direction for a signed drive value
    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            -1 => Some(Direction::Anticlockwise),
            0 => Some(Direction::Stop),
            1 => Some(Direction::Clockwise),
            _ => None,
        }
    }

    /// Get the opposite direction (stop is its own opposite)
    pub fn opposite(self) -> Self {
        match self {
            Direction::Clockwise => Direction::Anticlockwise,
            Direction::Anticlockwise => Direction::Clockwise,
            Direction::Stop => Direction::Stop,
        }
    }

    /// Input pin asserted HIGH for this direction
    ///
    /// `None` for [`Direction::Stop`], which only touches the enable line.
    pub fn drive_role(self) -> Option<PinRole> {
        match self {
            Direction::Clockwise => Some(PinRole::Clockwise),
            Direction::Anticlockwise => Some(PinRole::Anticlockwise),
            Direction::Stop => None,
        }
    }

    /// Check if this direction turns the motor
    pub fn is_spinning(self) -> bool {
        self != Direction::Stop
    }
}

/// Motor state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorState {
    /// Enable line low (initial state)
    #[default]
    Stopped,
    /// Enable high, clockwise input asserted
    SpinningClockwise,
    /// Enable high, anticlockwise input asserted
    SpinningAnticlockwise,
}

impl MotorState {
    /// State reached after driving in `direction`
    ///
    /// Every direction is accepted from every state.
    pub fn transition(self, direction: Direction) -> Self {
        match direction {
            Direction::Stop => MotorState::Stopped,
            Direction::Clockwise => MotorState::SpinningClockwise,
            Direction::Anticlockwise => MotorState::SpinningAnticlockwise,
        }
    }

    /// Direction the motor is currently driven in
    pub fn direction(self) -> Direction {
        match self {
            MotorState::Stopped => Direction::Stop,
            MotorState::SpinningClockwise => Direction::Clockwise,
            MotorState::SpinningAnticlockwise => Direction::Anticlockwise,
        }
    }

    /// Check if the motor is being driven
    pub fn is_running(self) -> bool {
        self != MotorState::Stopped
    }
}
