//! Linux GPIO backend
//!
//! Drives Raspberry Pi header pins through the kernel's sysfs GPIO
//! interface. Pins are addressed by header position and translated to
//! kernel line numbers with [`l293d_hal::header::bcm_line`] plus the
//! configured chip base.

#![deny(unsafe_code)]

pub mod sysfs;

pub use sysfs::{OpenError, SysfsConfig, SysfsGpio};
