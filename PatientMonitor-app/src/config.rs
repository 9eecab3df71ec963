//! Runtime configuration for the PatientMonitor binary
//!
//! Settings come from environment variables, optionally seeded from a `.env` file:
//! - `ALERT_CHANNEL`: `log` (default) or `stdout`
//! - `RUST_LOG`: tracing filter directive, `info` by default

use std::env;
use std::str::FromStr;

use patient_monitor_domain::services::{LoggingAlertService, SendAlertService, StdoutAlertService};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `ALERT_CHANNEL` names a channel that does not exist
    #[error("Unsupported alert channel: {0}")]
    UnsupportedAlertChannel(String),
}

/// Where alert messages are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertChannel {
    /// Emit alerts as warning events through tracing
    #[default]
    Log,
    /// Print alerts to stdout
    Stdout,
}

impl FromStr for AlertChannel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "log" => Ok(AlertChannel::Log),
            "stdout" => Ok(AlertChannel::Stdout),
            _ => Err(ConfigError::UnsupportedAlertChannel(s.to_string())),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// Alert delivery channel
    pub alert_channel: AlertChannel,
    /// Tracing filter directive
    pub log_filter: String,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            alert_channel: AlertChannel::Log,
            log_filter: "info".to_string(),
        }
    }
}

impl MonitorConfig {
    /// Create a configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create a configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let alert_channel = match lookup("ALERT_CHANNEL") {
            Some(value) => value.parse()?,
            None => defaults.alert_channel,
        };

        let log_filter = lookup("RUST_LOG")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            alert_channel,
            log_filter,
        })
    }
}

/// Build the alert service for a channel
pub fn create_alert_service(channel: AlertChannel) -> Box<dyn SendAlertService + Send + Sync> {
    match channel {
        AlertChannel::Log => Box::new(LoggingAlertService::new()),
        AlertChannel::Stdout => Box::new(StdoutAlertService::new()),
    }
}
