//! Motor driver trait
//!
//! Abstracts over H-bridge motor drivers that take a signed direction and
//! an optional run time. Methods take `&self` because a timed stop runs on
//! a background worker that shares the motor with the caller.

use core::time::Duration;

use crate::pins::MotorPins;
use crate::state::{Direction, MotorState};

/// Trait for direction-controlled DC motor drivers
pub trait MotorDriver {
    /// Error returned by drive operations
    type Error;

    /// Handle to a scheduled stop that the caller chose not to wait for
    type PendingStop;

    /// Pins this motor drives
    fn pins(&self) -> MotorPins;

    /// Current motor state
    fn state(&self) -> MotorState;

    /// Drive the motor in `direction`
    ///
    /// With `duration` set and a spinning direction, a stop is scheduled
    /// after that long. If `wait` is true the call blocks until the stop has
    /// happened and returns `None`; otherwise it returns immediately with a
    /// handle to the pending stop. `duration` is ignored for
    /// [`Direction::Stop`].
    fn drive(
        &self,
        direction: Direction,
        duration: Option<Duration>,
        wait: bool,
    ) -> Result<Option<Self::PendingStop>, Self::Error>;

    /// Stop the motor, optionally after sleeping for `after`
    ///
    /// The sleep happens on the calling thread.
    fn stop(&self, after: Duration) -> Result<(), Self::Error>;

    /// Spin clockwise
    fn spin_clockwise(
        &self,
        duration: Option<Duration>,
        wait: bool,
    ) -> Result<Option<Self::PendingStop>, Self::Error> {
        self.drive(Direction::Clockwise, duration, wait)
    }

    /// Spin anticlockwise
    fn spin_anticlockwise(
        &self,
        duration: Option<Duration>,
        wait: bool,
    ) -> Result<Option<Self::PendingStop>, Self::Error> {
        self.drive(Direction::Anticlockwise, duration, wait)
    }

    /// Check if the motor is being driven
    fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// Check if the motor is stopped
    fn is_stopped(&self) -> bool {
        !self.is_running()
    }
}
