//! Search engine facade.
//!
//! `SphinxEngine` is what the persistence layer talks to: it turns changed
//! records into index mutations, turns search queries into selects, and maps
//! raw hits back to hydrated records in relevance order.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::config::EngineConfig;
use crate::errors::SphinxError;
use crate::interfaces::{HydrationSource, Searchable, SphinxQlExecutor};
use crate::mapper;
use crate::sphinxql::{DeleteStatement, ReplaceStatement, SelectStatement, TruncateStatement};
use sphinx_scout_shared::{
    FieldMap, FieldValue, Filter, OrderDirection, Page, RawResultSet, SearchQuery, SearchResults,
};

/// Field set token matching every full-text field.
pub const ANY_FIELD: &str = "*";

/// Relevance expression used for the default ordering.
pub const RELEVANCE: &str = "WEIGHT()";

/// The search engine adapter.
/// Holds a shared executor handle and its configuration; every call is
/// otherwise independent.
pub struct SphinxEngine {
    executor: Arc<dyn SphinxQlExecutor>,
    config: EngineConfig,
}

impl SphinxEngine {
    /// Create a new SphinxEngine with default configuration.
    pub fn new(executor: Arc<dyn SphinxQlExecutor>) -> Self {
        Self {
            executor,
            config: EngineConfig::default(),
        }
    }

    /// Create a new SphinxEngine with custom configuration.
    pub fn with_config(executor: Arc<dyn SphinxQlExecutor>, config: EngineConfig) -> Self {
        Self { executor, config }
    }

    /// The engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SphinxError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SphinxError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Upsert records into their search index.
    ///
    /// Records with no searchable fields are skipped. Everything else goes
    /// out as a single `REPLACE` against the first record's index, with the
    /// first record's field names as the column list. Nothing is sent when
    /// every record was skipped.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn update<R: Searchable>(&self, records: &[R]) -> Result<(), SphinxError> {
        let batch: Vec<(u64, String, FieldMap)> = records
            .iter()
            .filter_map(|record| {
                let fields = record.to_searchable_fields();
                if fields.is_empty() {
                    debug!(key = record.search_key(), "No searchable fields, skipping record");
                    return None;
                }
                Some((record.search_key(), record.searchable_as(), fields))
            })
            .collect();

        let Some((_, index, first)) = batch.first() else {
            debug!("Nothing to index");
            return Ok(());
        };

        self.validate_batch_size(batch.len())?;

        if !first.contains_key(&self.config.key_column) {
            warn!(
                index = %index,
                key_column = %self.config.key_column,
                "Searchable fields do not include the key column"
            );
        }

        let columns: Vec<String> = first.keys().map(str::to_string).collect();
        let mut statement = ReplaceStatement::new(index.as_str()).columns(columns.iter().cloned());
        for (key, record_index, fields) in &batch {
            if record_index != index {
                warn!(
                    key = key,
                    expected = %index,
                    found = %record_index,
                    "Record belongs to a different index, writing to the batch index"
                );
            }
            statement = statement.values(row_values(*key, &columns, fields)?);
        }

        self.executor.execute(&statement.into()).await?;

        debug!(index = %index, rows = batch.len(), "Records indexed");
        Ok(())
    }

    /// Remove records from their search index.
    ///
    /// A single record is deleted with an equality filter, several with one
    /// membership filter. An empty slice sends nothing.
    #[instrument(skip(self, records), fields(record_count = records.len()))]
    pub async fn delete<R: Searchable>(&self, records: &[R]) -> Result<(), SphinxError> {
        let Some(first) = records.first() else {
            debug!("Nothing to delete");
            return Ok(());
        };

        let keys: Vec<u64> = records.iter().map(Searchable::search_key).collect();
        let key_column = self.config.key_column.as_str();
        let filter = match keys.as_slice() {
            [key] => Filter::eq(key_column, *key),
            _ => Filter::is_in(key_column, keys.iter().copied()),
        };

        let index = first.searchable_as();
        let statement = DeleteStatement::new(index.as_str()).filter(filter);
        self.executor.execute(&statement.into()).await?;

        debug!(index = %index, count = keys.len(), "Records deleted");
        Ok(())
    }

    /// Remove every document from a real-time index.
    #[instrument(skip(self))]
    pub async fn flush(&self, index: &str) -> Result<(), SphinxError> {
        self.executor
            .execute(&TruncateStatement::new(index).into())
            .await?;
        info!(index = %index, "Index flushed");
        Ok(())
    }

    /// Run a search and return the raw rows.
    #[instrument(skip(self, query), fields(index = query.index()))]
    pub async fn search(&self, query: &SearchQuery) -> Result<RawResultSet, SphinxError> {
        let statement = self.build_select(query);
        self.executor.query(&statement).await
    }

    /// Run a search restricted to one page.
    ///
    /// `page` is 1-based; page 0 is treated as the first page.
    pub async fn paginate(
        &self,
        query: &SearchQuery,
        per_page: usize,
        page: usize,
    ) -> Result<RawResultSet, SphinxError> {
        let paged = query.clone().for_page(per_page, page);
        self.search(&paged).await
    }

    /// Translate a query into a select statement.
    ///
    /// The text is wrapped as a quorum-1 phrase against every field and is
    /// otherwise sent as-is. Blank text leaves out the match clause. Without
    /// explicit ordering results come by relevance; the key column is always
    /// the final tie-break so that pages are stable.
    pub fn build_select(&self, query: &SearchQuery) -> SelectStatement {
        let key_column = self.config.key_column.as_str();
        let mut statement = SelectStatement::new(query.index());

        if query.has_text() {
            statement = statement.match_expression(ANY_FIELD, format!("\"{}\"/1", query.text()));
        }

        for filter in query.filters() {
            statement = statement.filter(filter.clone());
        }

        if query.orders().is_empty() {
            statement = statement.order_by(RELEVANCE, OrderDirection::Desc);
        }
        for order in query.orders() {
            statement = statement.order_by(order.column.as_str(), order.direction);
        }
        if !query.orders().iter().any(|o| o.column == key_column) {
            statement = statement.order_by(key_column, OrderDirection::Asc);
        }

        let offset = query.get_offset();
        let limit = query.get_limit().unwrap_or(self.config.default_limit);
        statement = statement.limit(offset, limit);

        let window = offset.saturating_add(limit);
        match query.get_max_matches() {
            Some(max_matches) => statement = statement.option("max_matches", max_matches),
            None if window > self.config.max_matches => {
                statement = statement.option("max_matches", window)
            }
            None => {}
        }

        statement
    }

    /// Document ids of `raw`, most relevant first.
    pub fn map_ids(&self, raw: &RawResultSet) -> Vec<u64> {
        mapper::ordered_keys(raw, &self.config.key_column)
    }

    /// Total number of matches the daemon reported for `raw`.
    pub fn total_count(&self, raw: &RawResultSet) -> u64 {
        raw.total()
    }

    /// Hydrate raw hits into records, in relevance order.
    ///
    /// The hydration source is not consulted when there are no hits. Hits the
    /// source cannot load are dropped.
    #[instrument(skip(self, query, raw, source), fields(index = query.index(), rows = raw.len()))]
    pub async fn map<S: HydrationSource>(
        &self,
        query: &SearchQuery,
        raw: &RawResultSet,
        source: &S,
    ) -> Result<SearchResults<S::Record>, SphinxError> {
        let keys = self.map_ids(raw);
        if keys.is_empty() {
            return Ok(SearchResults::empty(raw.total()));
        }

        let hydrated = source.load_by_keys(&keys).await?;
        let records = mapper::reorder_by_keys(&keys, hydrated);

        if records.len() < keys.len() {
            debug!(
                hits = keys.len(),
                hydrated = records.len(),
                "Some hits were not found in the primary store"
            );
        }

        Ok(SearchResults::new(records, raw.total()))
    }

    /// Search and hydrate in one call.
    pub async fn get<S: HydrationSource>(
        &self,
        query: &SearchQuery,
        source: &S,
    ) -> Result<SearchResults<S::Record>, SphinxError> {
        let raw = self.search(query).await?;
        self.map(query, &raw, source).await
    }

    /// Search one page and hydrate it.
    pub async fn get_page<S: HydrationSource>(
        &self,
        query: &SearchQuery,
        per_page: usize,
        page: usize,
        source: &S,
    ) -> Result<Page<S::Record>, SphinxError> {
        let raw = self.paginate(query, per_page, page).await?;
        let results = self.map(query, &raw, source).await?;
        Ok(results.into_page(per_page, page))
    }

    /// Check if the daemon is reachable.
    pub async fn health_check(&self) -> Result<bool, SphinxError> {
        self.executor.health_check().await
    }
}

/// Values of one record laid out in `columns` order.
fn row_values(
    key: u64,
    columns: &[String],
    fields: &FieldMap,
) -> Result<Vec<FieldValue>, SphinxError> {
    if fields.len() != columns.len() {
        return Err(SphinxError::invalid_batch(format!(
            "record {} has {} fields, batch has {} columns",
            key,
            fields.len(),
            columns.len()
        )));
    }
    columns
        .iter()
        .map(|column| {
            fields.get(column).cloned().ok_or_else(|| {
                SphinxError::invalid_batch(format!(
                    "record {} is missing column '{}'",
                    key, column
                ))
            })
        })
        .collect()
}
