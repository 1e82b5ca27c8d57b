//! # Sphinx Scout Shared
//!
//! Plain data types shared between the engine and its callers: field values
//! and ordered field maps, search queries and filters, and the raw and
//! hydrated result collections.

pub mod field;
pub mod query;
pub mod results;

pub use field::{FieldMap, FieldValue};
pub use query::{Condition, Filter, OrderBy, OrderDirection, SearchQuery};
pub use results::{Page, RawResultRow, RawResultSet, SearchResults};
