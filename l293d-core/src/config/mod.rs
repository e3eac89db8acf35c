//! Configuration types
//!
//! Board-agnostic configuration structures, deserializable from TOML when
//! the `serde` feature is enabled.

pub mod types;

pub use types::*;
