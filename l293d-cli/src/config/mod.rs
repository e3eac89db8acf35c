//! Configuration loading
//!
//! Reads the TOML file describing the backend and the motors wired to it.

pub mod loader;

pub use loader::{load_config, BackendConfig, BackendKind, ConfigError};
