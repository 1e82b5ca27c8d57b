//! Configuration types for the SphinxEngine.

/// Default page size, matching the daemon's own implicit `LIMIT 0, 20`.
pub const DEFAULT_LIMIT: usize = 20;

/// Default `max_matches` window of the daemon.
pub const DEFAULT_MAX_MATCHES: usize = 1000;

/// Configuration for the SphinxEngine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Name of the document id column in every index.
    pub key_column: String,
    /// Limit applied when a query does not set one.
    pub default_limit: usize,
    /// The daemon's `max_matches` window. Queries reaching past it get an
    /// explicit `OPTION max_matches`.
    pub max_matches: usize,
    /// Maximum number of records allowed in a single upsert.
    /// None disables the limit.
    pub max_batch_size: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            key_column: "id".to_string(),
            default_limit: DEFAULT_LIMIT,
            max_matches: DEFAULT_MAX_MATCHES,
            max_batch_size: None,
        }
    }
}

impl EngineConfig {
    /// Use a different document id column.
    pub fn with_key_column(mut self, key_column: impl Into<String>) -> Self {
        self.key_column = key_column.into();
        self
    }

    /// Use a different implicit page size.
    pub fn with_default_limit(mut self, default_limit: usize) -> Self {
        self.default_limit = default_limit;
        self
    }

    /// Use a different `max_matches` window.
    pub fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    /// Reject upserts larger than `max_batch_size` records.
    pub fn with_max_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = Some(max_batch_size);
        self
    }
}
