//! Result types.
//!
//! `RawResultSet` is what the daemon returned for one select; `SearchResults`
//! is the hydrated, relevance-ordered collection handed back to callers.

use serde::{Deserialize, Serialize};

use crate::field::{FieldMap, FieldValue};

/// One row returned by the search daemon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResultRow {
    fields: FieldMap,
}

impl RawResultRow {
    /// Wrap the decoded columns of one row.
    pub fn new(fields: FieldMap) -> Self {
        Self { fields }
    }

    /// Value of the named column.
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.fields.get(column)
    }

    /// The document id held in `key_column`, if present and numeric.
    pub fn key(&self, key_column: &str) -> Option<u64> {
        self.fields.get(key_column).and_then(FieldValue::as_key)
    }

    /// All columns, in result order.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Consume the row, returning its columns.
    pub fn into_fields(self) -> FieldMap {
        self.fields
    }
}

impl From<FieldMap> for RawResultRow {
    fn from(fields: FieldMap) -> Self {
        Self::new(fields)
    }
}

/// Rows of a single select, most relevant first, plus the total match count.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResultSet {
    rows: Vec<RawResultRow>,
    total: u64,
}

impl RawResultSet {
    /// Create a result set with an explicit total (e.g. `total_found` from
    /// `SHOW META`).
    pub fn new(rows: Vec<RawResultRow>, total: u64) -> Self {
        Self { rows, total }
    }

    /// Create a result set whose total is the number of rows.
    pub fn from_rows(rows: Vec<RawResultRow>) -> Self {
        let total = rows.len() as u64;
        Self { rows, total }
    }

    /// A result set with no rows and a zero total.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rows, most relevant first.
    pub fn rows(&self) -> &[RawResultRow] {
        &self.rows
    }

    /// Total matches known to the daemon; may exceed `len()`.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of rows returned.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows were returned.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Hydrated records in relevance order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<T> {
    pub records: Vec<T>,
    pub total: u64,
}

impl<T> SearchResults<T> {
    /// Wrap hydrated records and the daemon total.
    pub fn new(records: Vec<T>, total: u64) -> Self {
        Self { records, total }
    }

    /// No records, keeping the daemon total.
    pub fn empty(total: u64) -> Self {
        Self {
            records: Vec::new(),
            total,
        }
    }

    /// Number of hydrated records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records were hydrated.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in relevance order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.records.iter()
    }

    /// Consume the results, returning the records.
    pub fn into_records(self) -> Vec<T> {
        self.records
    }

    /// Wrap as one page of a paginated listing.
    pub fn into_page(self, per_page: usize, current_page: usize) -> Page<T> {
        Page {
            records: self.records,
            total: self.total,
            per_page,
            current_page: current_page.max(1),
        }
    }
}

impl<T> IntoIterator for SearchResults<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// One page of hydrated records with the metadata a paginator needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub per_page: usize,
    pub current_page: usize,
}

impl<T> Page<T> {
    /// Last 1-based page number. Always at least 1.
    pub fn last_page(&self) -> usize {
        if self.per_page == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(self.per_page as u64);
        usize::try_from(pages).unwrap_or(usize::MAX).max(1)
    }

    /// Whether a page follows this one.
    pub fn has_more_pages(&self) -> bool {
        self.current_page < self.last_page()
    }
}
