//! Query-execution client trait definition.
//!
//! This module defines the abstract interface the engine uses to send
//! SphinxQL statements to the daemon, allowing the MySQL-protocol client to be
//! replaced by a recording double in tests.

use async_trait::async_trait;

use crate::errors::SphinxError;
use crate::sphinxql::{SelectStatement, Statement};
use sphinx_scout_shared::RawResultSet;

/// Abstract interface for executing SphinxQL statements.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
/// Whether a single implementation may serve concurrent callers is up to the
/// implementation; the engine adds no locking of its own.
///
/// # Error Handling
///
/// Daemon and connection failures are returned as `SphinxError` and the engine
/// propagates them unchanged.
#[async_trait]
pub trait SphinxQlExecutor: Send + Sync {
    /// Execute a mutating statement (`REPLACE`, `DELETE`, `TRUNCATE`).
    ///
    /// `Statement` has no select variant; selects go through `query`.
    ///
    /// # Returns
    ///
    /// * `Ok(u64)` - Number of affected rows as reported by the daemon
    /// * `Err(SphinxError)` - If rendering or execution fails
    async fn execute(&self, statement: &Statement) -> Result<u64, SphinxError>;

    /// Execute a select and return its rows in daemon order.
    ///
    /// The returned set's total is the daemon's `total_found` for this select.
    ///
    /// # Returns
    ///
    /// * `Ok(RawResultSet)` - Rows, most relevant first, plus the total
    /// * `Err(SphinxError)` - If rendering, execution or decoding fails
    async fn query(&self, statement: &SelectStatement) -> Result<RawResultSet, SphinxError>;

    /// Check if the daemon is reachable and answering.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the daemon answered
    /// * `Ok(false)` - If the daemon answered unexpectedly
    /// * `Err(SphinxError)` - If the check could not be executed
    async fn health_check(&self) -> Result<bool, SphinxError>;
}
