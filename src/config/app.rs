//! Application configuration structures.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::sampler::SessionConfig;

use super::validation::ConfigError;

// =============================================================================
// Constants
// =============================================================================

/// Default probe target (Google public DNS).
pub const DEFAULT_TARGET: &str = "8.8.8.8";

/// Default probe interval (1 second).
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);

pub use crate::probe::DEFAULT_PROBE_TIMEOUT;

/// Default chart window (trailing samples shown).
pub const DEFAULT_WINDOW: usize = 7;

fn default_target() -> String {
    DEFAULT_TARGET.to_string()
}

fn default_interval() -> Duration {
    DEFAULT_INTERVAL
}

fn default_probe_timeout() -> Duration {
    DEFAULT_PROBE_TIMEOUT
}

fn default_window() -> usize {
    DEFAULT_WINDOW
}

fn default_ping_command() -> String {
    "ping".to_string()
}

// =============================================================================
// Application Configuration
// =============================================================================

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Probe target host (default: "8.8.8.8").
    #[serde(default = "default_target")]
    pub target: String,

    /// Probe interval (default: 1s). Values below 1s are clamped by the
    /// sampler.
    #[serde(default = "default_interval", with = "humantime_serde")]
    pub interval: Duration,

    /// Per-probe timeout (default: 5s).
    #[serde(default = "default_probe_timeout", with = "humantime_serde")]
    pub probe_timeout: Duration,

    /// Number of trailing samples to chart (default: 7).
    #[serde(default = "default_window")]
    pub window: usize,

    /// Ping executable to invoke (default: "ping").
    #[serde(default = "default_ping_command")]
    pub ping_command: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            interval: DEFAULT_INTERVAL,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            window: DEFAULT_WINDOW,
            ping_command: default_ping_command(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns `ConfigError::ValidationError` if any field is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "target cannot be empty".to_string(),
            ));
        }

        if self.ping_command.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "ping_command cannot be empty".to_string(),
            ));
        }

        if self.window == 0 {
            return Err(ConfigError::ValidationError(
                "window must be positive".to_string(),
            ));
        }

        if self.probe_timeout.is_zero() {
            return Err(ConfigError::ValidationError(
                "probe_timeout must be positive".to_string(),
            ));
        }

        Ok(())
    }

    /// The sampler-facing subset of this configuration.
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(self.target.clone()).with_interval(self.interval)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.target, "8.8.8.8");
        assert_eq!(config.interval, Duration::from_secs(1));
        assert_eq!(config.probe_timeout, Duration::from_secs(5));
        assert_eq!(config.window, 7);
        assert_eq!(config.ping_command, "ping");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_parse_yaml() {
        let yaml = "target: 1.1.1.1\ninterval: 2s\nwindow: 10\n";
        let config: AppConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.target, "1.1.1.1");
        assert_eq!(config.interval, Duration::from_secs(2));
        assert_eq!(config.window, 10);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.probe_timeout, DEFAULT_PROBE_TIMEOUT);
        assert_eq!(config.ping_command, "ping");
    }

    #[test]
    fn test_config_validation_empty_target() {
        let config = AppConfig {
            target: "  ".to_string(),
            ..AppConfig::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("target"));
    }

    #[test]
    fn test_config_validation_zero_window() {
        let config = AppConfig {
            window: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_zero_timeout() {
        let config = AppConfig {
            probe_timeout: Duration::ZERO,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_load_missing_file() {
        let result = AppConfig::load("/definitely/not/a/config.yaml");
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }

    #[test]
    fn test_config_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "target: 9.9.9.9\n").unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.target, "9.9.9.9");
        assert_eq!(config.interval, DEFAULT_INTERVAL);
    }

    #[test]
    fn test_session_config_carries_target_and_interval() {
        let config = AppConfig {
            target: "1.1.1.1".to_string(),
            interval: Duration::from_secs(3),
            ..AppConfig::default()
        };
        let session = config.session_config();
        assert_eq!(session.target, "1.1.1.1");
        assert_eq!(session.interval, Duration::from_secs(3));
    }
}
