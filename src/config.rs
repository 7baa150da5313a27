//! Configuration Layer
//!
//! YAML-file configuration with CLI/env overrides applied by the binary.
//! Validation is separate from loading so overridden values are checked too.

mod app;
mod validation;

pub use app::{
    AppConfig, DEFAULT_INTERVAL, DEFAULT_PROBE_TIMEOUT, DEFAULT_TARGET, DEFAULT_WINDOW,
};
pub use validation::{parse_duration, ConfigError};
