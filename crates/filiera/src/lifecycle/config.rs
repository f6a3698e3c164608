//! Runtime configuration read from `FILIERA_*` environment variables.

use actor_framework::tracing::LogFormat;
use thiserror::Error;

pub const MAILBOX_CAPACITY: &str = "FILIERA_MAILBOX_CAPACITY";
pub const FREE_ACCESS: &str = "FILIERA_FREE_ACCESS";
pub const DELIVERY_DAYS: &str = "FILIERA_DELIVERY_DAYS";
pub const LOG_FORMAT: &str = "FILIERA_LOG_FORMAT";

/// Upper bound for `FILIERA_DELIVERY_DAYS` (ten years).
pub const MAX_DELIVERY_DAYS: u32 = 3650;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {key}={value:?}: {reason}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Buffer of every resource actor's mailbox.
    pub mailbox_capacity: usize,
    /// Authorization gates approve everything.
    pub free_access: bool,
    /// Expected-delivery offset for new orders, `0..=MAX_DELIVERY_DAYS`.
    pub delivery_days: u32,
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mailbox_capacity: 32,
            free_access: false,
            delivery_days: 4,
            log_format: LogFormat::Compact,
        }
    }
}

fn parse<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|e: T::Err| ConfigError {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; unset keys take their default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let config = Self {
            mailbox_capacity: parse(
                MAILBOX_CAPACITY,
                lookup(MAILBOX_CAPACITY),
                defaults.mailbox_capacity,
            )?,
            free_access: parse(FREE_ACCESS, lookup(FREE_ACCESS), defaults.free_access)?,
            delivery_days: parse(DELIVERY_DAYS, lookup(DELIVERY_DAYS), defaults.delivery_days)?,
            log_format: parse(LOG_FORMAT, lookup(LOG_FORMAT), defaults.log_format)?,
        };
        if config.delivery_days > MAX_DELIVERY_DAYS {
            return Err(ConfigError {
                key: DELIVERY_DAYS,
                value: config.delivery_days.to_string(),
                reason: format!("must be at most {MAX_DELIVERY_DAYS}"),
            });
        }
        if config.mailbox_capacity == 0 {
            return Err(ConfigError {
                key: MAILBOX_CAPACITY,
                value: "0".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(config)
    }
}
