//! Motor driver implementations

pub mod l293d;

pub use l293d::{L293dMotor, StopHandle};
