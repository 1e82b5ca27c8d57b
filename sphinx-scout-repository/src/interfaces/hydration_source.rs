//! Hydration source trait definition.

use async_trait::async_trait;

use crate::errors::SphinxError;
use crate::interfaces::Searchable;

/// Loads full records from the primary store given their document ids.
///
/// Implementations may return records in any order and may omit ids that no
/// longer exist; the engine restores relevance order and drops the gaps.
#[async_trait]
pub trait HydrationSource: Send + Sync {
    /// The record type produced by this source.
    type Record: Searchable + Send;

    /// Load every record whose id is in `keys`.
    ///
    /// Failures of the underlying store should be reported as
    /// `SphinxError::HydrationError`.
    async fn load_by_keys(&self, keys: &[u64]) -> Result<Vec<Self::Record>, SphinxError>;
}
