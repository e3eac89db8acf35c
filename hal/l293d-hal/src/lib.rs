//! l293d Hardware Abstraction Layer
//!
//! This crate defines the GPIO backend trait that the motor driver writes
//! through. Backends address pins by their physical header number (1-40),
//! the same numbering printed on the board silkscreen.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (l293d-cli, etc.)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  l293d-drivers (motor, controller)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  l293d-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┼───────────┐
//!         ▼           ▼           ▼
//! ┌─────────────┐ ┌─────────┐ ┌──────────────┐
//! │ l293d-hal-  │ │ PinMap  │ │ l293d-hal-   │
//! │   linux     │ │ (e-hal) │ │    sim       │
//! └─────────────┘ └─────────┘ └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`gpio`] - [`GpioBackend`], [`Level`] and [`GpioError`]
//! - [`header`] - Raspberry Pi 40-pin header to BCM line mapping
//! - [`embedded`] - Backend over `embedded-hal` output pins

#![no_std]
#![deny(unsafe_code)]

pub mod embedded;
pub mod gpio;
pub mod header;

// Re-export key items at crate root for convenience
pub use embedded::PinMap;
pub use gpio::{GpioBackend, GpioError, Level};
