//! Hardware abstraction traits
//!
//! These traits define the interface between application logic and the
//! motor driver implementations.

pub mod motor;

pub use motor::MotorDriver;
