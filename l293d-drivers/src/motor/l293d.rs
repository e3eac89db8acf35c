//! L293D H-bridge channel driver
//!
//! This driver provides:
//! - Direction control through the two input lines
//! - Enable line switching for start/stop
//! - Timed runs that stop on a background worker
//!
//! # Pin sequence
//!
//! | Command       | Writes (in order)                          |
//! |---------------|--------------------------------------------|
//! | Clockwise     | cw HIGH, ccw LOW, enable HIGH              |
//! | Anticlockwise | ccw HIGH, cw LOW, enable HIGH              |
//! | Stop          | enable LOW (inputs left as they were)      |
//!
//! The inputs are set before the enable line goes high so the bridge never
//! drives with a stale direction.
//!
//! # Usage
//!
//! ```ignore
//! let motor = controller.create_motor(22, 18, 16)?;
//!
//! // Spin for two seconds, blocking
//! motor.spin_clockwise(Some(Duration::from_secs(2)), true)?;
//!
//! // Spin for two seconds in the background
//! let pending = motor.spin_anticlockwise(Some(Duration::from_secs(2)), false)?;
//! do_other_work();
//! if let Some(stop) = pending {
//!     stop.join()?;
//! }
//! ```

use std::fmt;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use l293d_core::traits::MotorDriver;
use l293d_core::{Direction, MotorPins, MotorState};
use l293d_hal::GpioBackend;
use log::{debug, error, info, warn};

use crate::error::MotorError;

/// Lock a mutex, recovering the data if a previous holder panicked
///
/// Pin writes are single calls, so the guarded data is never left
/// half-updated.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

type StopResult = Result<(), MotorError>;

/// Body of a stop worker
type StopWork = Box<dyn FnOnce() -> StopResult + Send + 'static>;

/// Starts a named stop worker
type Spawner = fn(String, StopWork) -> io::Result<JoinHandle<StopResult>>;

fn spawn_thread(name: String, work: StopWork) -> io::Result<JoinHandle<StopResult>> {
    thread::Builder::new().name(name).spawn(work)
}

/// State shared between a motor and its stop workers
struct Channel<G> {
    pins: MotorPins,
    gpio: Arc<Mutex<G>>,
    state: Mutex<MotorState>,
    test_mode: bool,
}

impl<G: GpioBackend> Channel<G> {
    /// Write the pin sequence for `direction` and record the new state
    fn apply(&self, direction: Direction) -> Result<(), MotorError> {
        // State lock is held across the writes so a stop worker can't
        // interleave with a direction change
        let mut state = lock(&self.state);

        if !self.test_mode {
            let mut gpio = lock(&self.gpio);
            match (direction.drive_role(), direction.opposite().drive_role()) {
                (Some(on), Some(off)) => {
                    gpio.set_high(self.pins.get(on))?;
                    gpio.set_low(self.pins.get(off))?;
                    gpio.set_high(self.pins.enable)?;
                }
                _ => gpio.set_low(self.pins.enable)?,
            }
        }

        *state = state.transition(direction);
        Ok(())
    }

    fn halt(&self) -> Result<(), MotorError> {
        info!("stopping motor at pins {}", self.pins);
        self.apply(Direction::Stop)
    }
}

/// Handle to a stop running on a background worker
///
/// Dropping the handle detaches the worker; the stop still happens.
#[derive(Debug)]
pub struct StopHandle {
    worker: JoinHandle<StopResult>,
}

impl StopHandle {
    /// Block until the stop has been applied
    pub fn join(self) -> Result<(), MotorError> {
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => Err(MotorError::WorkerPanicked),
        }
    }

    /// Check if the stop has already run
    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }
}

/// One motor on an L293D channel
///
/// Created by [`crate::MotorController`], which reserves the pins. Clones
/// share the same channel and state.
pub struct L293dMotor<G> {
    channel: Arc<Channel<G>>,
}

impl<G> Clone for L293dMotor<G> {
    fn clone(&self) -> Self {
        Self {
            channel: Arc::clone(&self.channel),
        }
    }
}

impl<G> fmt::Debug for L293dMotor<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("L293dMotor")
            .field("pins", &self.channel.pins)
            .field("state", &*lock(&self.channel.state))
            .field("test_mode", &self.channel.test_mode)
            .finish()
    }
}

impl<G: GpioBackend + Send + 'static> L293dMotor<G> {
    /// Wrap already-reserved and configured pins
    pub(crate) fn new(pins: MotorPins, gpio: Arc<Mutex<G>>, test_mode: bool) -> Self {
        Self {
            channel: Arc::new(Channel {
                pins,
                gpio,
                state: Mutex::new(MotorState::Stopped),
                test_mode,
            }),
        }
    }

    /// Start a worker that stops the motor after `after`
    ///
    /// A failed stop is logged by the worker, so it is not lost when the
    /// handle is dropped.
    fn schedule_stop(&self, after: Duration, spawn: Spawner) -> Result<StopHandle, MotorError> {
        let channel = Arc::clone(&self.channel);
        let work: StopWork = Box::new(move || {
            thread::sleep(after);
            let result = channel.halt();
            if let Err(e) = &result {
                error!("timed stop failed for motor at pins {}: {}", channel.pins, e);
            }
            result
        });
        let worker = spawn(format!("l293d-stop-{}", self.channel.pins.enable), work)
            .map_err(MotorError::Spawn)?;

        debug!(
            "stop scheduled for motor at pins {} in {:?}",
            self.channel.pins, after
        );
        Ok(StopHandle { worker })
    }

    fn run(
        &self,
        direction: Direction,
        duration: Option<Duration>,
        wait: bool,
        spawn: Spawner,
    ) -> Result<Option<StopHandle>, MotorError> {
        match direction {
            Direction::Clockwise => {
                info!("spinning motor at pins {} clockwise", self.channel.pins)
            }
            Direction::Anticlockwise => {
                info!("spinning motor at pins {} anticlockwise", self.channel.pins)
            }
            Direction::Stop => return self.channel.halt().map(|()| None),
        }

        self.channel.apply(direction)?;

        let Some(duration) = duration else {
            return Ok(None);
        };

        let stop = match self.schedule_stop(duration, spawn) {
            Ok(stop) => stop,
            Err(e) => {
                // Never leave a timed run spinning without its stop
                warn!(
                    "no stop worker for motor at pins {}, stopping now",
                    self.channel.pins
                );
                self.channel.halt()?;
                return Err(e);
            }
        };

        if wait {
            stop.join()?;
            Ok(None)
        } else {
            Ok(Some(stop))
        }
    }
}

impl<G: GpioBackend + Send + 'static> MotorDriver for L293dMotor<G> {
    type Error = MotorError;
    type PendingStop = StopHandle;

    fn pins(&self) -> MotorPins {
        self.channel.pins
    }

    fn state(&self) -> MotorState {
        *lock(&self.channel.state)
    }

    fn drive(
        &self,
        direction: Direction,
        duration: Option<Duration>,
        wait: bool,
    ) -> Result<Option<StopHandle>, MotorError> {
        self.run(direction, duration, wait, spawn_thread)
    }

    fn stop(&self, after: Duration) -> Result<(), MotorError> {
        if !after.is_zero() {
            thread::sleep(after);
        }
        self.channel.halt()
    }
}
