//! Search query types.
//!
//! A `SearchQuery` names the index to search, carries the free-text query and
//! any attribute filters, ordering and pagination bounds.

use serde::{Deserialize, Serialize};

use crate::field::FieldValue;

/// Comparison applied to an attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Condition {
    Eq(FieldValue),
    NotEq(FieldValue),
    Lt(FieldValue),
    Lte(FieldValue),
    Gt(FieldValue),
    Gte(FieldValue),
    In(Vec<FieldValue>),
    NotIn(Vec<FieldValue>),
    Between(FieldValue, FieldValue),
}

impl Condition {
    /// The SphinxQL operator keyword for this condition.
    pub fn operator(&self) -> &'static str {
        match self {
            Condition::Eq(_) => "=",
            Condition::NotEq(_) => "!=",
            Condition::Lt(_) => "<",
            Condition::Lte(_) => "<=",
            Condition::Gt(_) => ">",
            Condition::Gte(_) => ">=",
            Condition::In(_) => "IN",
            Condition::NotIn(_) => "NOT IN",
            Condition::Between(_, _) => "BETWEEN",
        }
    }
}

/// A single attribute filter: `field <operator> operand`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub field: String,
    pub condition: Condition,
}

impl Filter {
    /// Filter `field` with an arbitrary condition.
    pub fn new(field: impl Into<String>, condition: Condition) -> Self {
        Self {
            field: field.into(),
            condition,
        }
    }

    /// `field = value`
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, Condition::Eq(value.into()))
    }

    /// `field != value`
    pub fn not_eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, Condition::NotEq(value.into()))
    }

    /// `field < value`
    pub fn lt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, Condition::Lt(value.into()))
    }

    /// `field <= value`
    pub fn lte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, Condition::Lte(value.into()))
    }

    /// `field > value`
    pub fn gt(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, Condition::Gt(value.into()))
    }

    /// `field >= value`
    pub fn gte(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Self::new(field, Condition::Gte(value.into()))
    }

    /// `field IN (values)`
    pub fn is_in<V: Into<FieldValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(
            field,
            Condition::In(values.into_iter().map(Into::into).collect()),
        )
    }

    /// `field NOT IN (values)`
    pub fn not_in<V: Into<FieldValue>>(
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::new(
            field,
            Condition::NotIn(values.into_iter().map(Into::into).collect()),
        )
    }

    /// `field BETWEEN low AND high`
    pub fn between(
        field: impl Into<String>,
        low: impl Into<FieldValue>,
        high: impl Into<FieldValue>,
    ) -> Self {
        Self::new(field, Condition::Between(low.into(), high.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderDirection {
    Asc,
    Desc,
}

impl OrderDirection {
    /// The SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            OrderDirection::Asc => "ASC",
            OrderDirection::Desc => "DESC",
        }
    }
}

/// An explicit ordering clause requested by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: OrderDirection,
}

impl OrderBy {
    /// Ascending order on `column`.
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: OrderDirection::Asc,
        }
    }

    /// Descending order on `column`.
    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: OrderDirection::Desc,
        }
    }
}

/// Search query parameters.
///
/// Built with consuming builder methods and then handed to the engine by
/// reference; the engine never mutates it.
///
/// ```ignore
/// let query = SearchQuery::new("articles", "rust async")
///     .filter(Filter::eq("published", 1))
///     .order_by(OrderBy::desc("created_at"))
///     .limit(10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    index: String,
    text: String,
    filters: Vec<Filter>,
    orders: Vec<OrderBy>,
    offset: usize,
    limit: Option<usize>,
    max_matches: Option<usize>,
}

impl SearchQuery {
    /// Create a query against `index` for the raw full-text `text`.
    pub fn new(index: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            text: text.into(),
            filters: Vec::new(),
            orders: Vec::new(),
            offset: 0,
            limit: None,
            max_matches: None,
        }
    }

    /// Add an attribute filter.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Shorthand for an equality filter.
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.filter(Filter::eq(field, value))
    }

    /// Shorthand for a membership filter.
    pub fn where_in<V: Into<FieldValue>>(
        self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        self.filter(Filter::is_in(field, values))
    }

    /// Append an ordering; earlier orderings take priority.
    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.orders.push(order);
        self
    }

    /// Skip the first `offset` matches.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Return at most `limit` matches.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Override the daemon's `max_matches` window for this query.
    pub fn max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = Some(max_matches);
        self
    }

    /// Restrict the query to the given 1-based page. Page 0 is treated as 1.
    pub fn for_page(self, per_page: usize, page: usize) -> Self {
        let page = page.max(1);
        self.offset((page - 1).saturating_mul(per_page)).limit(per_page)
    }

    /// The index to search.
    pub fn index(&self) -> &str {
        &self.index
    }

    /// The raw full-text query.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute filters.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Explicit orderings.
    pub fn orders(&self) -> &[OrderBy] {
        &self.orders
    }

    /// Number of matches skipped.
    pub fn get_offset(&self) -> usize {
        self.offset
    }

    /// Requested limit, if any.
    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    /// Explicit `max_matches` override, if any.
    pub fn get_max_matches(&self) -> Option<usize> {
        self.max_matches
    }

    /// Whether the query carries any full-text terms.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = SearchQuery::new("articles", "search query")
            .where_eq("foo", 1)
            .where_in("tag", [1u64, 2, 3])
            .order_by(OrderBy::desc("created_at"))
            .offset(5)
            .limit(10);

        assert_eq!(query.index(), "articles");
        assert_eq!(query.text(), "search query");
        assert_eq!(query.filters().len(), 2);
        assert_eq!(query.filters()[0], Filter::eq("foo", 1));
        assert_eq!(query.filters()[1].condition.operator(), "IN");
        assert_eq!(query.orders(), &[OrderBy::desc("created_at")]);
        assert_eq!(query.get_offset(), 5);
        assert_eq!(query.get_limit(), Some(10));
    }

    #[test]
    fn test_for_page() {
        let query = SearchQuery::new("articles", "x").for_page(15, 3);
        assert_eq!(query.get_offset(), 30);
        assert_eq!(query.get_limit(), Some(15));

        let first = SearchQuery::new("articles", "x").for_page(15, 0);
        assert_eq!(first.get_offset(), 0);
    }

    #[test]
    fn test_for_page_far_past_the_end() {
        let query = SearchQuery::new("articles", "x").for_page(2, usize::MAX);
        assert_eq!(query.get_offset(), usize::MAX);
        assert_eq!(query.get_limit(), Some(2));
    }

    #[test]
    fn test_has_text() {
        assert!(SearchQuery::new("a", "term").has_text());
        assert!(!SearchQuery::new("a", "   ").has_text());
        assert!(!SearchQuery::new("a", "").has_text());
    }
}
