//! Board-agnostic core logic for the l293d motor driver
//!
//! This crate contains everything that does not touch a GPIO backend:
//!
//! - Pin reservation across motors ([`registry::PinRegistry`])
//! - The enable / anticlockwise / clockwise pin triple ([`pins::MotorPins`])
//! - Direction and motor state ([`state`])
//! - The motor driver trait ([`traits::MotorDriver`])
//! - Configuration type definitions ([`config`])

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod pins;
pub mod registry;
pub mod state;
pub mod traits;

pub use error::PinError;
pub use pins::{MotorPins, PinRole};
pub use registry::PinRegistry;
pub use state::{Direction, MotorState};
