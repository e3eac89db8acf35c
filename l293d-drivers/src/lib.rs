//! L293D motor driver implementation
//!
//! This crate provides concrete implementations of the traits defined in
//! l293d-core:
//!
//! - [`motor::L293dMotor`] - one H-bridge channel with timed stops
//! - [`controller::MotorController`] - reserves pins and builds motors
//!   over a shared GPIO backend

#![deny(unsafe_code)]

pub mod controller;
pub mod error;
pub mod motor;

pub use controller::{ControllerSettings, MotorController};
pub use error::MotorError;
pub use motor::{L293dMotor, StopHandle};
