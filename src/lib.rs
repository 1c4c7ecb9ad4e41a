//! pulpo-config library
//!
//! Layered configuration with dotted-path access, typed getters and
//! environment-variable indirection.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use config::{ConfigStore, Value, deep_merge};
pub use error::{ConfigError, ConfigResult};
