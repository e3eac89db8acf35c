//! Motor pin triple
//!
//! One L293D channel is controlled by three lines:
//!
//! | Index | Role          | L293D pin      | Effect when HIGH                |
//! |-------|---------------|----------------|---------------------------------|
//! | 0     | Enable        | 1 or 9         | Channel drives current          |
//! | 1     | Anticlockwise | 2 or 10        | Motor turns anticlockwise       |
//! | 2     | Clockwise     | 7 or 15        | Motor turns clockwise           |
//!
//! The index order is fixed; configuration files and positional
//! constructors always list pins as (enable, anticlockwise, clockwise).

use core::fmt;

/// Role of a pin within a motor's triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PinRole {
    /// H-bridge channel enable
    Enable = 0,
    /// Input asserted for anticlockwise rotation
    Anticlockwise = 1,
    /// Input asserted for clockwise rotation
    Clockwise = 2,
}

impl PinRole {
    /// All roles in index order
    pub const ALL: [PinRole; 3] = [PinRole::Enable, PinRole::Anticlockwise, PinRole::Clockwise];

    /// Position of this role in the triple
    pub fn index(self) -> usize {
        self as usize
    }

    /// Role at a position in the triple
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Enable, anticlockwise and clockwise pins of one motor
///
/// The default triple is all zeros, which never passes validation; it
/// only exists so partially-filled configs have something to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotorPins {
    /// Enable pin
    pub enable: u8,
    /// Anticlockwise input pin
    pub anticlockwise: u8,
    /// Clockwise input pin
    pub clockwise: u8,
}

impl MotorPins {
    /// Create a pin triple
    pub const fn new(enable: u8, anticlockwise: u8, clockwise: u8) -> Self {
        Self {
            enable,
            anticlockwise,
            clockwise,
        }
    }

    /// Pin number for a role
    pub fn get(&self, role: PinRole) -> u8 {
        match role {
            PinRole::Enable => self.enable,
            PinRole::Anticlockwise => self.anticlockwise,
            PinRole::Clockwise => self.clockwise,
        }
    }

    /// Pins in index order
    pub fn as_array(&self) -> [u8; 3] {
        [self.enable, self.anticlockwise, self.clockwise]
    }

    /// Check if any role uses the given pin
    pub fn contains(&self, pin: u8) -> bool {
        self.as_array().contains(&pin)
    }
}

impl From<[u8; 3]> for MotorPins {
    fn from(pins: [u8; 3]) -> Self {
        Self::new(pins[0], pins[1], pins[2])
    }
}

impl fmt::Display for MotorPins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}, {} and {}]",
            self.enable, self.anticlockwise, self.clockwise
        )
    }
}
