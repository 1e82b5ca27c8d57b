//! Sphinx error types.
//!
//! This module defines the error types that can occur while talking to the
//! search daemon or preparing statements for it.

use thiserror::Error;

/// Errors that can occur during search engine operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SphinxError {
    /// Failed to establish or keep a connection to the daemon.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The daemon rejected the statement.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A result column could not be decoded.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The statement cannot be rendered as SphinxQL.
    #[error("Invalid statement: {0}")]
    InvalidStatement(String),

    /// Rows of an update batch do not agree with its column list.
    #[error("Invalid batch: {0}")]
    InvalidBatch(String),

    /// Batch size exceeds configured maximum.
    #[error("Batch size {provided} exceeds maximum {max}")]
    BatchSizeExceeded { provided: usize, max: usize },

    /// The hydration source failed to load records.
    #[error("Hydration error: {0}")]
    HydrationError(String),
}

impl SphinxError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    /// Create an invalid statement error.
    pub fn invalid_statement(msg: impl Into<String>) -> Self {
        Self::InvalidStatement(msg.into())
    }

    /// Create an invalid batch error.
    pub fn invalid_batch(msg: impl Into<String>) -> Self {
        Self::InvalidBatch(msg.into())
    }

    /// Create a batch size exceeded error.
    pub fn batch_size_exceeded(provided: usize, max: usize) -> Self {
        Self::BatchSizeExceeded { provided, max }
    }

    /// Create a hydration error.
    pub fn hydration(msg: impl Into<String>) -> Self {
        Self::HydrationError(msg.into())
    }
}

impl From<sqlx::Error> for SphinxError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::ConnectionError(err.to_string()),
            sqlx::Error::ColumnDecode { .. }
            | sqlx::Error::Decode(_)
            | sqlx::Error::ColumnNotFound(_)
            | sqlx::Error::ColumnIndexOutOfBounds { .. } => Self::DecodeError(err.to_string()),
            _ => Self::QueryError(err.to_string()),
        }
    }
}
