//! # Sphinx Scout
//!
//! Main library for the Sphinx search driver binary.
//!
//! This crate provides environment configuration, dependency wiring and the
//! command-line interface used to poke at a running daemon.

pub mod cli;
pub mod config;

pub use config::{Dependencies, Settings};

use thiserror::Error;

/// Errors that can occur during startup or while running a command.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] sphinx_scout_repository::SphinxError),

    /// Output serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ScoutError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
