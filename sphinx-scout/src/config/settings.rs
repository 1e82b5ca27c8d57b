//! Settings read from the environment.

use std::env;
use std::str::FromStr;

use crate::ScoutError;
use sphinx_scout_repository::EngineConfig;

/// Default SphinxQL listener URL.
const DEFAULT_SPHINX_URL: &str = "mysql://127.0.0.1:9306";

/// Default connection pool size.
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Runtime settings for the driver.
#[derive(Debug, Clone)]
pub struct Settings {
    /// SphinxQL listener URL.
    pub sphinx_url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Engine behaviour.
    pub engine: EngineConfig,
}

impl Settings {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SPHINX_URL`: SphinxQL listener (default: mysql://127.0.0.1:9306)
    /// - `SPHINX_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `SPHINX_KEY_COLUMN`: document id column (default: id)
    /// - `SPHINX_DEFAULT_LIMIT`: page size when a query sets none (default: 20)
    /// - `SPHINX_MAX_MATCHES`: the daemon's max_matches window (default: 1000)
    /// - `SPHINX_MAX_BATCH_SIZE`: largest accepted upsert (default: unlimited)
    pub fn from_env() -> Result<Self, ScoutError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load settings through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoutError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();

        let engine = EngineConfig {
            key_column: lookup("SPHINX_KEY_COLUMN").unwrap_or(defaults.key_column),
            default_limit: parse_or(&lookup, "SPHINX_DEFAULT_LIMIT", defaults.default_limit)?,
            max_matches: parse_or(&lookup, "SPHINX_MAX_MATCHES", defaults.max_matches)?,
            max_batch_size: parse_optional(&lookup, "SPHINX_MAX_BATCH_SIZE")?,
        };

        Ok(Self {
            sphinx_url: lookup("SPHINX_URL").unwrap_or_else(|| DEFAULT_SPHINX_URL.to_string()),
            max_connections: parse_or(&lookup, "SPHINX_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            engine,
        })
    }
}

fn parse_optional<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ScoutError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ScoutError::config(format!("Invalid {}='{}': {}", key, raw, e))),
        None => Ok(None),
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ScoutError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    Ok(parse_optional(lookup, key)?.unwrap_or(default))
}
