//! Configuration Module
//!
//! Handles loading cache and demo server settings from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use crate::error::{CacheError, Result};

/// Cache and server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
/// Durations are read as whole milliseconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Default TTL applied by `GcTtlCache::set` when the caller passes zero
    pub default_ttl: Duration,
    /// Interval between background sweeps, zero disables the sweeper
    pub gc_interval: Duration,
    /// HTTP server port
    pub server_port: u16,
    /// Interval between recomputations of the served value
    pub refresh_interval: Duration,
    /// Simulated latency of a single calculation
    pub calc_delay: Duration,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// Falls back to [`Config::default`] when any variable is malformed.
    ///
    /// # Environment Variables
    /// - `DEFAULT_TTL_MS` - Default entry TTL (default: 300000)
    /// - `GC_INTERVAL_MS` - Sweep frequency, 0 disables it (default: 1000)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `REFRESH_INTERVAL_MS` - Value refresh frequency, must be non-zero (default: 2000)
    /// - `CALC_DELAY_MS` - Simulated calculation latency (default: 1000)
    pub fn from_env() -> Self {
        Self::try_from_env().unwrap_or_else(|err| {
            warn!(error = %err, "Falling back to default configuration");
            Self::default()
        })
    }

    /// Like [`Config::from_env`], but reports malformed variables instead of
    /// silently using defaults.
    pub fn try_from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let millis = |name: &str, default: Duration| -> Result<Duration> {
            Ok(parse_var::<u64, _>(&lookup, name)?
                .map(Duration::from_millis)
                .unwrap_or(default))
        };

        let refresh_interval = millis("REFRESH_INTERVAL_MS", defaults.refresh_interval)?;
        if refresh_interval.is_zero() {
            return Err(CacheError::InvalidConfig(
                "REFRESH_INTERVAL_MS must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            default_ttl: millis("DEFAULT_TTL_MS", defaults.default_ttl)?,
            gc_interval: millis("GC_INTERVAL_MS", defaults.gc_interval)?,
            server_port: parse_var(&lookup, "SERVER_PORT")?.unwrap_or(defaults.server_port),
            refresh_interval,
            calc_delay: millis("CALC_DELAY_MS", defaults.calc_delay)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300),
            gc_interval: Duration::from_secs(1),
            server_port: 8080,
            refresh_interval: Duration::from_secs(2),
            calc_delay: Duration::from_secs(1),
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| CacheError::InvalidConfig(format!("{}={:?} is not a valid value", name, raw))),
        None => Ok(None),
    }
}
